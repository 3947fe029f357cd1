impl<K, C, F> SessionEngine<K, C, F>
where
    K: AssessmentKind,
    C: ContentSource,
    F: Feedback,
{
    fn decode(&mut self, frame: &InputFrame, now_ms: u64) -> FrameEvents {
        let mut events = FrameEvents::default();
        for button in Button::ALL {
            let index = button.index();
            events.buttons[index] = self.buttons[index].update(frame.pressed(button), now_ms);
        }
        events.key = frame.key();
        events.dial = self.dial.update(frame.dial);
        events
    }

    fn apply_events(&mut self, events: &FrameEvents, now_ms: u64) {
        match self.state {
            SessionState::Init | SessionState::Closed(_) => {}
            SessionState::Loading => {
                if events.back() {
                    self.abort_request();
                    self.enter_closed(SessionExit::Cancelled);
                }
            }
            SessionState::SelectingAssessment => self.apply_selection_input(events, now_ms),
            SessionState::CollectingIdentity(field) => {
                self.apply_identity_input(field, events, now_ms)
            }
            SessionState::Downloading => {
                if events.back() {
                    self.abort_request();
                    self.enter_selecting();
                }
            }
            SessionState::Running => self.apply_running_input(events, now_ms),
            SessionState::Paused => self.apply_pause_input(events, now_ms),
            SessionState::Overview => self.apply_overview_input(events, now_ms),
            SessionState::Submitting => {
                if events.back() {
                    warn!("{}: stopped waiting for result upload", K::NAME);
                    self.abort_request();
                    self.finish_submission();
                }
            }
            SessionState::ShowingResult => self.apply_result_input(events),
            SessionState::Review => self.apply_review_input(events),
            SessionState::Done => {
                if events.accept() || events.back() {
                    self.enter_closed(SessionExit::Completed);
                }
            }
            SessionState::EmptyError(_) => {
                if events.accept() || events.back() {
                    if self.catalog.is_empty() {
                        self.enter_closed(SessionExit::NoContent);
                    } else {
                        self.enter_selecting();
                    }
                }
            }
        }
    }

    fn apply_selection_input(&mut self, events: &FrameEvents, now_ms: u64) {
        if events.back() {
            self.enter_closed(SessionExit::Cancelled);
            return;
        }
        if events.accept() {
            self.feedback.cue(Cue::Confirm);
            if K::REQUIRES_IDENTITY {
                self.enter_identity(IdentityField::Name);
            } else {
                self.enter_download(now_ms);
            }
            return;
        }

        let count = self.catalog.len();
        let previous = self.list_cursor.selected();
        if let Some(raw) = events.dial {
            self.list_cursor.select(self.dial_mapper.map(raw, count), count);
        }
        if events.up() {
            self.list_cursor.step_prev(count);
        } else if events.down() {
            self.list_cursor.step_next(count);
        }

        if self.list_cursor.selected() != previous {
            debug!(
                "{}: catalog cursor {} -> {}",
                K::NAME,
                previous,
                self.list_cursor.selected()
            );
            self.feedback.cue(Cue::Click);
            self.pending_redraw = true;
        }
    }

    fn apply_identity_input(&mut self, field: IdentityField, events: &FrameEvents, now_ms: u64) {
        if events.accept() {
            if self.identity.field(field).trim().is_empty() {
                self.feedback.cue(Cue::Error);
                return;
            }
            self.feedback.cue(Cue::Confirm);
            match field {
                IdentityField::Name => self.enter_identity(IdentityField::StudentId),
                IdentityField::StudentId => self.enter_download(now_ms),
            }
            return;
        }

        if events.back() {
            match field {
                IdentityField::StudentId => self.enter_identity(IdentityField::Name),
                IdentityField::Name => self.enter_selecting(),
            }
            return;
        }

        let edited = match events.key {
            Some(Key::Char(ch)) => self.identity.field_mut(field).push(ch).is_ok(),
            Some(Key::Backspace) => self.identity.field_mut(field).pop().is_some(),
            _ => false,
        };
        if edited {
            self.pending_redraw = true;
        }
    }

    fn current_mode(&self) -> Option<AnswerMode> {
        let question = self.assessment.as_ref()?.questions.get(self.current)?;
        Some(K::mode(question))
    }

    fn apply_running_input(&mut self, events: &FrameEvents, now_ms: u64) {
        let Some(mode) = self.current_mode() else {
            return;
        };

        if events.long_press(Button::D) || events.key_is(Key::Escape) {
            self.enter_paused(now_ms, PauseItem::Resume);
            return;
        }

        if let Some(key) = events.key {
            let before = self.state;
            self.apply_running_key(mode, key, now_ms);
            if self.state != before {
                return;
            }
        }

        if mode == AnswerMode::Choice {
            for (button, choice) in [(Button::A, 0), (Button::B, 1), (Button::C, 2)] {
                if events.pressed(button) {
                    self.answer_choice(choice);
                }
            }
            if events.short_release(Button::D) {
                self.answer_choice(3);
            }
        }
    }

    fn apply_running_key(&mut self, mode: AnswerMode, key: Key, now_ms: u64) {
        let typed = mode == AnswerMode::Text;
        match key {
            Key::Left => self.step_question(false),
            Key::Right => self.step_question(true),
            Key::Char(ch) if typed => {
                if self.draft.push(ch).is_ok() {
                    self.pending_redraw = true;
                }
            }
            Key::Backspace if typed => {
                if self.draft.pop().is_some() {
                    self.pending_redraw = true;
                }
            }
            Key::Enter if typed => self.confirm_typed(),
            Key::Enter => {
                debug!("{}: submit requested from question {}", K::NAME, self.current);
                self.enter_submitting(now_ms);
            }
            key if key.is_prev() => self.step_question(false),
            key if key.is_next() => self.step_question(true),
            _ => {}
        }
    }

    fn step_question(&mut self, forward: bool) {
        let last = self.slots.len().saturating_sub(1);
        let target = if forward {
            self.current.saturating_add(1).min(last)
        } else {
            self.current.saturating_sub(1)
        };
        if target != self.current {
            self.go_to_question(target);
            self.feedback.cue(Cue::Click);
        }
    }

    fn answer_choice(&mut self, choice: u8) {
        let Some(question) = self
            .assessment
            .as_ref()
            .and_then(|assessment| assessment.questions.get(self.current))
        else {
            return;
        };
        let Some(answer) = K::choice(question, choice) else {
            debug!(
                "{}: choice {} ignored on question {} ({} options)",
                K::NAME,
                choice,
                self.current,
                question.options.len()
            );
            return;
        };
        let Some(slot) = self.slots.get_mut(self.current) else {
            return;
        };

        let signal = slot.select(answer);
        debug!(
            "{}: question {} choice {} -> {:?}",
            K::NAME,
            self.current,
            choice,
            signal
        );
        self.signal_answer(signal);
    }

    fn confirm_typed(&mut self) {
        let Some(question) = self
            .assessment
            .as_ref()
            .and_then(|assessment| assessment.questions.get(self.current))
        else {
            return;
        };
        let Some(answer) = K::typed(question, self.draft.trim()) else {
            self.feedback.cue(Cue::Error);
            return;
        };
        let Some(slot) = self.slots.get_mut(self.current) else {
            return;
        };

        let signal = slot.confirm(answer);
        debug!("{}: question {} typed answer confirmed", K::NAME, self.current);
        self.signal_answer(signal);
    }

    fn signal_answer(&mut self, signal: AnswerSignal) {
        match signal {
            AnswerSignal::Selected => self.feedback.cue(Cue::Click),
            AnswerSignal::Confirmed => self.feedback.cue(Cue::Confirm),
        }
        self.pending_redraw = true;
    }

    fn apply_pause_input(&mut self, events: &FrameEvents, now_ms: u64) {
        if events.back() {
            self.resume_at(self.current, now_ms);
            return;
        }
        if events.accept() {
            let item = PauseItem::from_index(self.pause_cursor);
            debug!("{}: pause menu -> {:?}", K::NAME, item);
            self.feedback.cue(Cue::Confirm);
            match item {
                PauseItem::Resume => self.resume_at(self.current, now_ms),
                PauseItem::ViewAll => self.enter_overview(),
                PauseItem::Submit => self.enter_submitting(now_ms),
                PauseItem::Exit => self.enter_closed(SessionExit::Abandoned),
            }
            return;
        }

        let previous = self.pause_cursor;
        if let Some(raw) = events.dial {
            self.pause_cursor = self.dial_mapper.map(raw, PauseItem::COUNT);
        }
        if events.up() {
            self.pause_cursor = self.pause_cursor.saturating_sub(1);
        } else if events.down() {
            self.pause_cursor = (self.pause_cursor + 1).min(PauseItem::COUNT - 1);
        }

        if self.pause_cursor != previous {
            self.feedback.cue(Cue::Click);
            self.pending_redraw = true;
        }
    }

    fn apply_overview_input(&mut self, events: &FrameEvents, now_ms: u64) {
        if events.back() {
            self.enter_paused(now_ms, PauseItem::ViewAll);
            return;
        }
        if events.accept() {
            let target = self.sheet_cursor.selected();
            debug!("{}: overview jump to question {}", K::NAME, target);
            self.feedback.cue(Cue::Confirm);
            self.resume_at(target, now_ms);
            return;
        }

        let count = self.slots.len();
        let previous = self.sheet_cursor.selected();
        if let Some(raw) = events.dial {
            self.sheet_cursor.select(self.dial_mapper.map(raw, count), count);
        }
        if events.up() || events.key.is_some_and(Key::is_prev) {
            self.sheet_cursor.step_prev(count);
        } else if events.down() || events.key.is_some_and(Key::is_next) {
            self.sheet_cursor.step_next(count);
        }

        if self.sheet_cursor.selected() != previous {
            self.feedback.cue(Cue::Click);
            self.pending_redraw = true;
        }
    }

    fn apply_result_input(&mut self, events: &FrameEvents) {
        if events.pressed(Button::C) || matches!(events.key, Some(Key::Char('r' | 'R'))) {
            self.enter_review();
            return;
        }
        if events.accept() || events.back() {
            self.enter_closed(SessionExit::Completed);
        }
    }

    fn apply_review_input(&mut self, events: &FrameEvents) {
        if events.accept() || events.back() {
            self.enter_result(false);
            return;
        }

        let count = self.slots.len();
        let previous = self.review_index;
        if let Some(raw) = events.dial {
            self.review_index = self.dial_mapper.map(raw, count);
        }
        if events.up() || events.key.is_some_and(Key::is_prev) {
            self.review_index = self.review_index.saturating_sub(1);
        } else if events.down() || events.key.is_some_and(Key::is_next) {
            self.review_index = (self.review_index + 1).min(count.saturating_sub(1));
        }

        if self.review_index != previous {
            self.feedback.cue(Cue::Click);
            self.pending_redraw = true;
        }
    }
}
