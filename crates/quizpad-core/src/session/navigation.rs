impl<K, C, F> SessionEngine<K, C, F>
where
    K: AssessmentKind,
    C: ContentSource,
    F: Feedback,
{
    fn enter_loading(&mut self) {
        self.state = SessionState::Loading;
        self.pending_redraw = true;
    }

    fn enter_selecting(&mut self) {
        let count = self.catalog.len();
        self.list_cursor.select(self.list_cursor.selected(), count);
        debug!(
            "{}: enter selection cursor={}/{}",
            K::NAME,
            self.list_cursor.selected(),
            count
        );
        self.state = SessionState::SelectingAssessment;
        self.pending_redraw = true;
    }

    fn enter_identity(&mut self, field: IdentityField) {
        debug!("{}: enter identity field {:?}", K::NAME, field);
        self.state = SessionState::CollectingIdentity(field);
        self.pending_redraw = true;
    }

    fn enter_download(&mut self, now_ms: u64) {
        let Some(summary) = self.catalog.get(self.list_cursor.selected()) else {
            self.enter_empty_error(ContentError::Unavailable);
            return;
        };
        info!("{}: downloading '{}'", K::NAME, summary.title);
        let path = K::item_path(&summary.id);

        if self.begin_request(Request::Get { path: &path }, now_ms) {
            self.state = SessionState::Downloading;
            self.pending_redraw = true;
        } else {
            self.enter_empty_error(ContentError::Unavailable);
        }
    }

    fn enter_running(&mut self, now_ms: u64) {
        // A button still held from the previous screen must not answer.
        for (index, detector) in self.buttons.iter_mut().enumerate() {
            if detector.is_held() {
                *detector = EdgeDetector::settled(
                    self.config.button_debounce_ms[index],
                    self.config.long_press_ms,
                    true,
                    now_ms,
                );
            }
        }
        debug!(
            "{}: running question={} elapsed_ms={}",
            K::NAME,
            self.current,
            self.clock.elapsed_ms(now_ms)
        );
        self.state = SessionState::Running;
        self.pending_redraw = true;
    }

    /// Make `index` current and reseed its pending answer and draft from the
    /// confirmed answer.
    fn go_to_question(&mut self, index: usize) {
        self.current = index.min(self.slots.len().saturating_sub(1));
        self.draft.clear();

        let Some(slot) = self.slots.get_mut(self.current) else {
            return;
        };
        slot.reseed();

        let question = self
            .assessment
            .as_ref()
            .and_then(|assessment| assessment.questions.get(self.current));
        if let (Some(question), Some(answer)) = (question, slot.confirmed())
            && K::mode(question) == AnswerMode::Text
        {
            let _ = self.draft.push_str(K::answer_text(question, answer));
        }

        self.pending_redraw = true;
    }

    fn resume_at(&mut self, index: usize, now_ms: u64) {
        self.clock.resume(now_ms);
        if index != self.current {
            self.go_to_question(index);
        }
        self.enter_running(now_ms);
    }

    fn enter_paused(&mut self, now_ms: u64, cursor: PauseItem) {
        self.clock.pause(now_ms);
        self.pause_cursor = cursor.index();
        debug!(
            "{}: paused at elapsed_ms={}",
            K::NAME,
            self.clock.elapsed_ms(now_ms)
        );
        self.state = SessionState::Paused;
        self.pending_redraw = true;
    }

    fn enter_overview(&mut self) {
        let count = self.slots.len();
        self.sheet_cursor.reset_to(self.current, count);
        debug!(
            "{}: overview selected={} offset={}",
            K::NAME,
            self.sheet_cursor.selected(),
            self.sheet_cursor.scroll_offset()
        );
        self.state = SessionState::Overview;
        self.pending_redraw = true;
    }

    /// Score, then upload when this kind has a results endpoint. Results are
    /// shown whether or not the upload succeeds.
    fn enter_submitting(&mut self, now_ms: u64) {
        self.clock.pause(now_ms);
        let outcome = match self.assessment.as_ref() {
            Some(assessment) => score::score::<K>(&assessment.questions, &self.slots),
            None => Outcome::default(),
        };
        self.outcome = Some(outcome);
        info!(
            "{}: submitting score {}/{} after {} ms",
            K::NAME,
            outcome.score,
            outcome.total,
            self.clock.elapsed_ms(now_ms)
        );
        self.state = SessionState::Submitting;
        self.pending_redraw = true;

        let Some(path) = K::SUBMIT_PATH else {
            self.finish_submission();
            return;
        };

        let started = match self.submission_body(outcome) {
            Ok(body) => self.begin_request(Request::Post { path, body: &body }, now_ms),
            Err(err) => {
                warn!("{}: cannot encode results: {}", K::NAME, err);
                false
            }
        };
        if !started {
            warn!("{}: {}", K::NAME, ContentError::SubmissionFailed);
            self.finish_submission();
        }
    }

    fn finish_submission(&mut self) {
        let reveal = self
            .assessment
            .as_ref()
            .map_or(RevealPolicy::Immediate, |assessment| assessment.reveal);
        match reveal {
            RevealPolicy::Immediate => self.enter_result(true),
            RevealPolicy::Deferred => self.enter_done(),
        }
    }

    fn enter_result(&mut self, announce: bool) {
        if announce {
            let standing = self.outcome.unwrap_or_default().standing();
            self.feedback.cue(Cue::Result(standing));
        }
        self.state = SessionState::ShowingResult;
        self.pending_redraw = true;
    }

    fn enter_review(&mut self) {
        if self.slots.is_empty() {
            return;
        }
        self.review_index = 0;
        debug!("{}: review {} questions", K::NAME, self.slots.len());
        self.state = SessionState::Review;
        self.pending_redraw = true;
    }

    fn enter_done(&mut self) {
        self.feedback.cue(Cue::Complete);
        self.state = SessionState::Done;
        self.pending_redraw = true;
    }

    fn enter_empty_error(&mut self, error: ContentError) {
        warn!("{}: {}", K::NAME, error);
        self.feedback.cue(Cue::Error);
        self.state = SessionState::EmptyError(error);
        self.pending_redraw = true;
    }

    fn enter_closed(&mut self, exit: SessionExit) {
        self.abort_request();
        info!("{}: session closed ({:?})", K::NAME, exit);
        self.state = SessionState::Closed(exit);
        self.pending_redraw = true;
    }
}
