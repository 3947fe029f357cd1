impl<K, C, F> SessionEngine<K, C, F>
where
    K: AssessmentKind,
    C: ContentSource,
    F: Feedback,
{
    fn run_timers(&mut self, now_ms: u64) {
        match self.state {
            SessionState::Init => self.begin_catalog(now_ms),
            SessionState::Loading => self.poll_catalog(now_ms),
            SessionState::Downloading => self.poll_download(now_ms),
            SessionState::Running => self.tick_running(now_ms),
            SessionState::Submitting => self.poll_submission(now_ms),
            _ => {}
        }
    }

    fn begin_catalog(&mut self, now_ms: u64) {
        info!("{}: loading catalog from {}", K::NAME, K::LIST_PATH);
        if self.begin_request(Request::Get { path: K::LIST_PATH }, now_ms) {
            self.enter_loading();
        } else {
            self.enter_empty_error(ContentError::Unavailable);
        }
    }

    fn begin_request(&mut self, request: Request<'_>, now_ms: u64) -> bool {
        match self.content.begin(request) {
            Ok(()) => {
                debug!("{}: request {} started", K::NAME, request.path());
                self.request_started_ms = Some(now_ms);
                true
            }
            Err(err) => {
                warn!("{}: request {} not started: {:?}", K::NAME, request.path(), err);
                self.request_started_ms = None;
                false
            }
        }
    }

    fn abort_request(&mut self) {
        if self.request_started_ms.take().is_some() {
            self.content.cancel();
        }
    }

    /// Poll the in-flight request. `None` while it is still pending inside
    /// `timeout_ms`.
    fn poll_request(
        &mut self,
        now_ms: u64,
        timeout_ms: u32,
    ) -> Option<Result<Response, ContentError>> {
        let Some(started_ms) = self.request_started_ms else {
            return Some(Err(ContentError::Unavailable));
        };

        match self.content.poll() {
            Fetch::Ready(result) => {
                self.request_started_ms = None;
                Some(match result {
                    Ok(response) if response.is_success() => Ok(response),
                    Ok(response) => {
                        warn!("{}: backend answered status {}", K::NAME, response.status);
                        Err(ContentError::Unavailable)
                    }
                    Err(err) => {
                        warn!("{}: transport error: {:?}", K::NAME, err);
                        Err(ContentError::Unavailable)
                    }
                })
            }
            Fetch::Pending if now_ms.saturating_sub(started_ms) > timeout_ms as u64 => {
                warn!("{}: request timed out after {} ms", K::NAME, timeout_ms);
                self.abort_request();
                Some(Err(ContentError::Unavailable))
            }
            Fetch::Pending => None,
        }
    }

    fn poll_catalog(&mut self, now_ms: u64) {
        let Some(result) = self.poll_request(now_ms, self.config.fetch_timeout_ms) else {
            return;
        };

        match result.and_then(|response| wire::parse_catalog(&response.body)) {
            Ok(catalog) if catalog.is_empty() => {
                info!("{}: catalog is empty", K::NAME);
                self.catalog.clear();
                self.enter_empty_error(ContentError::Unavailable);
            }
            Ok(catalog) => {
                info!("{}: catalog loaded, {} entries", K::NAME, catalog.len());
                self.list_cursor.reset_to(0, catalog.len());
                self.catalog = catalog;
                self.enter_selecting();
            }
            Err(err) => self.enter_empty_error(err),
        }
    }

    fn poll_download(&mut self, now_ms: u64) {
        let Some(result) = self.poll_request(now_ms, self.config.fetch_timeout_ms) else {
            return;
        };

        match result.and_then(|response| K::parse(&response.body)) {
            Ok(assessment) if assessment.is_empty() => {
                self.enter_empty_error(ContentError::EmptyAssessment);
            }
            Ok(assessment) => self.start_assessment(assessment, now_ms),
            Err(err) => self.enter_empty_error(err),
        }
    }

    fn start_assessment(&mut self, assessment: Assessment<K::Key>, now_ms: u64) {
        let count = assessment.question_count();
        info!(
            "{}: '{}' ready, {} questions, limit {:?} s",
            K::NAME,
            assessment.title,
            count,
            assessment.duration_secs
        );

        self.slots = fresh_sheet(count);
        self.assessment = Some(assessment);
        self.sheet_cursor.reset_to(0, count);
        self.review_index = 0;
        self.outcome = None;
        self.warnings.reset();
        self.clock.start(now_ms);
        self.go_to_question(0);
        self.enter_running(now_ms);
    }

    /// Expiry is checked before warnings so an overdue tick closes the
    /// assessment instead of warning about it.
    fn tick_running(&mut self, now_ms: u64) {
        let Some(remaining) = self.remaining_secs(now_ms) else {
            return;
        };

        if remaining == 0 {
            info!(
                "{}: time up after {} ms",
                K::NAME,
                self.clock.elapsed_ms(now_ms)
            );
            self.feedback.cue(Cue::TimeUp);
            self.enter_submitting(now_ms);
            return;
        }

        for warning in self.warnings.observe(remaining) {
            debug!("{}: {:?} warning at {} s left", K::NAME, warning, remaining);
            self.feedback.cue(Cue::Warning(warning));
            self.pending_redraw = true;
        }
    }

    fn submission_body(&self, outcome: Outcome) -> Result<Vec<u8>, ContentError> {
        let exam_id = self
            .assessment
            .as_ref()
            .map_or("", |assessment| assessment.id.as_str());

        ResultSubmission {
            exam_id,
            student_name: self.identity.name.as_str(),
            student_id: self.identity.student_id.as_str(),
            score: outcome.score,
            total_questions: outcome.total,
            answers: self
                .slots
                .iter()
                .map(|slot| K::wire_answer(slot.confirmed()))
                .collect(),
        }
        .to_json()
    }

    fn poll_submission(&mut self, now_ms: u64) {
        let Some(result) = self.poll_request(now_ms, self.config.submit_timeout_ms) else {
            return;
        };

        match result {
            Ok(_) => info!("{}: results uploaded", K::NAME),
            Err(_) => warn!("{}: {}", K::NAME, ContentError::SubmissionFailed),
        }
        self.finish_submission();
    }
}
