impl<K, C, F> SessionEngine<K, C, F>
where
    K: AssessmentKind,
    C: ContentSource,
    F: Feedback,
{
    pub fn new(content: C, feedback: F, config: SessionConfig) -> Self {
        let config = config.sanitized();
        let rows = config.overview_rows as usize;

        Self {
            content,
            feedback,
            state: SessionState::Init,
            pending_redraw: true,
            buttons: core::array::from_fn(|index| {
                EdgeDetector::new(config.button_debounce_ms[index], config.long_press_ms)
            }),
            dial_mapper: DialMapper::new(config.dial_low_deadzone, config.dial_high_deadzone),
            dial: DialTracker::new(config.dial_hysteresis),
            catalog: Vec::new(),
            list_cursor: OverviewCursor::new(rows),
            identity: Identity::default(),
            assessment: None,
            slots: Vec::new(),
            current: 0,
            draft: heapless::String::new(),
            sheet_cursor: OverviewCursor::new(rows),
            pause_cursor: 0,
            review_index: 0,
            clock: SessionClock::new(),
            warnings: WarningLatch::new(config.early_warning_secs, config.final_warning_secs),
            outcome: None,
            request_started_ms: None,
            last_remaining_secs: None,
            last_blink_slot: None,
            config,
            _kind: PhantomData,
        }
    }

    /// Advance the session by one loop iteration.
    ///
    /// Every event of this tick is decoded from `frame`. Timers and pending
    /// requests run before input, so an expired assessment closes even when a
    /// button is pressed on the same tick; input is dropped on a tick whose
    /// timers already changed state.
    pub fn tick(&mut self, now_ms: u64, frame: &InputFrame) -> TickResult {
        let events = self.decode(frame, now_ms);

        let before = self.state;
        self.run_timers(now_ms);
        if self.state == before {
            self.apply_events(&events, now_ms);
        }

        self.refresh_live_fields(now_ms);

        if self.pending_redraw {
            self.pending_redraw = false;
            TickResult::RenderRequested
        } else {
            TickResult::NoRender
        }
    }

    /// Build the current screen and hand it to `f`. `f` is not called once
    /// the session is closed.
    pub fn with_screen<G>(&self, now_ms: u64, f: G)
    where
        G: FnOnce(Screen<'_>),
    {
        match self.state {
            SessionState::Init | SessionState::Loading => f(Screen::Loading {
                title: K::LABEL,
                message: "Loading...",
            }),
            SessionState::SelectingAssessment => {
                let total = self.catalog.len();
                let window = self.list_cursor.window(total);
                let first_index = window.start;
                let mut rows: HVec<&str, MAX_OVERVIEW_ROWS> = HVec::new();
                for summary in self.catalog.iter().skip(first_index).take(window.len()) {
                    let _ = rows.push(summary.title.as_str());
                }

                f(Screen::AssessmentList {
                    title: K::LABEL,
                    rows: rows.as_slice(),
                    cursor: self.list_cursor.selected().saturating_sub(first_index),
                    first_index,
                    total,
                });
            }
            SessionState::CollectingIdentity(field) => f(Screen::TextEntry {
                prompt: field.prompt(),
                value: self.identity.field(field).as_str(),
                cursor_visible: self.cursor_visible(now_ms),
            }),
            SessionState::Downloading => f(Screen::Loading {
                title: self.title(),
                message: "Downloading...",
            }),
            SessionState::Running => {
                let Some(assessment) = self.assessment.as_ref() else {
                    return;
                };
                let (Some(question), Some(slot)) = (
                    assessment.questions.get(self.current),
                    self.slots.get(self.current),
                ) else {
                    return;
                };

                let input = match K::mode(question) {
                    AnswerMode::Choice => QuestionInput::Choice {
                        options: &question.options,
                        pending: slot.pending().and_then(K::choice_index),
                        confirmed: slot.confirmed().and_then(K::choice_index),
                    },
                    AnswerMode::Text => QuestionInput::Text {
                        draft: self.draft.as_str(),
                        confirmed: slot
                            .confirmed()
                            .map(|answer| K::answer_text(question, answer)),
                        cursor_visible: self.cursor_visible(now_ms),
                    },
                };

                f(Screen::Question {
                    title: &assessment.title,
                    number: question_number(self.current),
                    total: as_count(assessment.question_count()),
                    text: &question.text,
                    input,
                    remaining_secs: self.remaining_secs(now_ms),
                    urgent: self.warnings.final_fired(),
                });
            }
            SessionState::Paused => f(Screen::PauseMenu {
                title: self.title(),
                items: &PauseItem::LABELS,
                cursor: self.pause_cursor,
                remaining_secs: self.remaining_secs(now_ms),
            }),
            SessionState::Overview => {
                let Some(assessment) = self.assessment.as_ref() else {
                    return;
                };
                let total = self.slots.len();
                let window = self.sheet_cursor.window(total);
                let first_index = window.start;
                let mut rows: HVec<SheetRowView<'_>, MAX_OVERVIEW_ROWS> = HVec::new();
                for (index, (question, slot)) in assessment
                    .questions
                    .iter()
                    .zip(self.slots.iter())
                    .enumerate()
                    .skip(first_index)
                    .take(window.len())
                {
                    let _ = rows.push(SheetRowView {
                        number: question_number(index),
                        status: slot.status(),
                        answer: slot
                            .confirmed()
                            .or(slot.pending())
                            .map(|answer| K::answer_text(question, answer)),
                    });
                }

                f(Screen::AnswerSheet {
                    rows: rows.as_slice(),
                    cursor: self.sheet_cursor.selected().saturating_sub(first_index),
                    first_index,
                    total,
                });
            }
            SessionState::Submitting => f(Screen::Submitting {
                title: self.title(),
            }),
            SessionState::ShowingResult => {
                let outcome = self.outcome.unwrap_or_default();
                f(Screen::Result {
                    title: self.title(),
                    score: outcome.score,
                    total: outcome.total,
                    percentage: outcome.percentage(),
                    grade: outcome.grade(),
                });
            }
            SessionState::Review => {
                let Some(assessment) = self.assessment.as_ref() else {
                    return;
                };
                let (Some(question), Some(slot)) = (
                    assessment.questions.get(self.review_index),
                    self.slots.get(self.review_index),
                ) else {
                    return;
                };

                f(Screen::Review {
                    number: question_number(self.review_index),
                    total: as_count(assessment.question_count()),
                    text: &question.text,
                    given: slot
                        .confirmed()
                        .map(|answer| K::answer_text(question, answer)),
                    correct_answer: K::key_text(question),
                    correct: slot
                        .confirmed()
                        .is_some_and(|answer| K::is_correct(question, answer)),
                });
            }
            SessionState::Done => f(Screen::Complete {
                title: self.title(),
            }),
            SessionState::EmptyError(error) => f(Screen::Error {
                message: error.message(),
            }),
            SessionState::Closed(_) => {}
        }
    }

    pub fn present<P: Presenter>(&self, now_ms: u64, presenter: &mut P) {
        self.with_screen(now_ms, |screen| presenter.present(screen));
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Exit reason once the session is closed.
    pub fn exit(&self) -> Option<SessionExit> {
        match self.state {
            SessionState::Closed(exit) => Some(exit),
            _ => None,
        }
    }

    /// Score computed at submission.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn assessment(&self) -> Option<&Assessment<K::Key>> {
        self.assessment.as_ref()
    }

    pub fn answers(&self) -> &[AnswerSlot<K::Answer>] {
        &self.slots
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn content(&self) -> &C {
        &self.content
    }

    pub fn feedback(&self) -> &F {
        &self.feedback
    }

    /// Running time of the current assessment, excluding pauses.
    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        self.clock.elapsed_ms(now_ms)
    }

    /// Whole seconds left, `None` before download or when untimed.
    pub fn remaining_secs(&self, now_ms: u64) -> Option<u32> {
        let total = self.assessment.as_ref()?.duration_secs?;
        Some(self.clock.remaining_secs(now_ms, total))
    }

    /// Drop the current session and start over from the catalog request.
    pub fn restart(&mut self) {
        self.abort_request();
        self.state = SessionState::Init;
        self.pending_redraw = true;
        self.catalog.clear();
        self.list_cursor.reset_to(0, 0);
        self.identity = Identity::default();
        self.assessment = None;
        self.slots.clear();
        self.current = 0;
        self.draft.clear();
        self.sheet_cursor.reset_to(0, 0);
        self.pause_cursor = 0;
        self.review_index = 0;
        self.clock = SessionClock::new();
        self.warnings.reset();
        self.outcome = None;
        self.last_remaining_secs = None;
        self.last_blink_slot = None;
        debug!("{}: restart", K::NAME);
    }

    fn title(&self) -> &str {
        if let Some(assessment) = self.assessment.as_ref() {
            return &assessment.title;
        }
        self.catalog
            .get(self.list_cursor.selected())
            .map_or(K::LABEL, |summary| summary.title.as_str())
    }

    fn cursor_visible(&self, now_ms: u64) -> bool {
        (now_ms / self.config.cursor_blink_ms as u64) % 2 == 0
    }

    fn blink_active(&self) -> bool {
        match self.state {
            SessionState::CollectingIdentity(_) => true,
            SessionState::Running => self.current_mode() == Some(AnswerMode::Text),
            _ => false,
        }
    }

    /// Request a redraw when the countdown second or the cursor blink phase
    /// changes.
    fn refresh_live_fields(&mut self, now_ms: u64) {
        let remaining = match self.state {
            SessionState::Running => self.remaining_secs(now_ms),
            _ => None,
        };
        if remaining != self.last_remaining_secs {
            self.last_remaining_secs = remaining;
            self.pending_redraw |= remaining.is_some();
        }

        let blink_slot = self
            .blink_active()
            .then(|| now_ms / self.config.cursor_blink_ms as u64);
        if blink_slot != self.last_blink_slot {
            self.last_blink_slot = blink_slot;
            self.pending_redraw |= blink_slot.is_some();
        }
    }
}

fn as_count(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

/// 1-based display number of question `index`.
fn question_number(index: usize) -> u16 {
    as_count(index.saturating_add(1))
}
