use alloc::{
    string::{String, ToString},
    vec::Vec,
};
use core::convert::Infallible;

use super::{ContentSource, Fetch, Request, Response};

/// Sample catalog served until the Wi-Fi backend is connected.
pub const SAMPLE_EXAM_LIST: &str = r#"[{"id":"bio-101","title":"Biology warm-up"}]"#;

pub const SAMPLE_EXAM: &str = r#"{
  "id": "bio-101",
  "title": "Biology warm-up",
  "duration_minutes": 5,
  "show_results_immediate": true,
  "questions": [
    {"id": 1, "text": "Powerhouse of the cell?", "correct_option": 1,
     "options": ["Nucleus", "Mitochondria", "Ribosome", "Golgi"]},
    {"id": 2, "text": "DNA bases pair A with?", "correct_option": 3,
     "options": ["C", "G", "A", "T"]},
    {"id": 3, "text": "Plants make sugar by?", "correct_option": 0,
     "options": ["Photosynthesis", "Respiration", "Osmosis"]}
  ]
}"#;

pub const SAMPLE_QUIZ_LIST: &str = r#"[{"id":1,"title":"Capitals"}]"#;

pub const SAMPLE_QUIZ: &str = r#"{
  "id": 1,
  "title": "Capitals",
  "questions": [
    {"id": 1, "type": "mcq", "text": "Capital of Italy?",
     "options": ["Milan", "Rome", "Turin"], "correct_answer": "1"},
    {"id": 2, "type": "short_answer", "text": "Capital of France?", "correct_answer": "Paris"}
  ]
}"#;

pub fn default_sample_source() -> StaticContentSource {
    StaticContentSource::new()
        .with_route("/exams", SAMPLE_EXAM_LIST)
        .with_route("/exams/bio-101", SAMPLE_EXAM)
        .with_route("/quizzes", SAMPLE_QUIZ_LIST)
        .with_route("/quizzes/1", SAMPLE_QUIZ)
}

/// In-memory backend keyed by request path.
///
/// Every request resolves on the first poll after `begin`. Unknown GET paths
/// answer 404; POST bodies are recorded and answered with 201.
#[derive(Debug, Clone, Default)]
pub struct StaticContentSource {
    routes: Vec<(String, Response)>,
    posts: Vec<(String, Vec<u8>)>,
    in_flight: Option<Response>,
}

impl StaticContentSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_route(self, path: &str, body: &str) -> Self {
        self.with_response(path, Response::ok(body.as_bytes()))
    }

    pub fn with_response(mut self, path: &str, response: Response) -> Self {
        match self.routes.iter_mut().find(|(route, _)| route == path) {
            Some((_, existing)) => *existing = response,
            None => self.routes.push((path.to_string(), response)),
        }
        self
    }

    /// Bodies received by POST requests, oldest first.
    pub fn posts(&self) -> &[(String, Vec<u8>)] {
        &self.posts
    }
}

impl ContentSource for StaticContentSource {
    type Error = Infallible;

    fn begin(&mut self, request: Request<'_>) -> Result<(), Self::Error> {
        let response = match request {
            Request::Get { path } => self
                .routes
                .iter()
                .find(|(route, _)| route == path)
                .map(|(_, response)| response.clone())
                .unwrap_or(Response::with_status(404)),
            Request::Post { path, body } => {
                self.posts.push((path.to_string(), body.to_vec()));
                Response::with_status(201)
            }
        };
        self.in_flight = Some(response);
        Ok(())
    }

    fn poll(&mut self) -> Fetch<Result<Response, Self::Error>> {
        match self.in_flight.take() {
            Some(response) => Fetch::Ready(Ok(response)),
            None => Fetch::Pending,
        }
    }

    fn cancel(&mut self) {
        self.in_flight = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::wire;

    #[test]
    fn get_resolves_on_first_poll_once() {
        let mut source = default_sample_source();
        assert_eq!(source.poll(), Fetch::Pending);

        source.begin(Request::Get { path: "/exams" }).unwrap();
        let Fetch::Ready(Ok(response)) = source.poll() else {
            panic!("expected a ready response");
        };
        assert!(response.is_success());
        assert_eq!(wire::parse_catalog(&response.body).unwrap().len(), 1);
        assert_eq!(source.poll(), Fetch::Pending);
    }

    #[test]
    fn unknown_path_is_not_found() {
        let mut source = StaticContentSource::new();
        source.begin(Request::Get { path: "/exams/nope" }).unwrap();
        assert_eq!(source.poll(), Fetch::Ready(Ok(Response::with_status(404))));
    }

    #[test]
    fn posts_are_recorded() {
        let mut source = StaticContentSource::new();
        source
            .begin(Request::Post {
                path: "/results",
                body: b"{}",
            })
            .unwrap();
        assert_eq!(source.poll(), Fetch::Ready(Ok(Response::with_status(201))));
        assert_eq!(source.posts(), &[("/results".to_string(), b"{}".to_vec())]);
    }

    #[test]
    fn samples_parse() {
        let exam = wire::parse_exam(SAMPLE_EXAM.as_bytes()).unwrap();
        assert_eq!(exam.question_count(), 3);
        let quiz = wire::parse_quiz(SAMPLE_QUIZ.as_bytes()).unwrap();
        assert_eq!(quiz.question_count(), 2);
        assert_eq!(quiz.duration_secs, None);
    }
}
