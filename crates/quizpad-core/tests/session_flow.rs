use quizpad_core::{
    ExamSession, QuizSession, SessionEngine, SessionExit, SessionState, TickResult,
    config::SessionConfig,
    content::static_source::{StaticContentSource, default_sample_source},
    feedback::SilentFeedback,
    input::{Button, InputFrame, InputProvider, keycode, mock::MockInput},
    kind::AssessmentKind,
    render::{Presenter, QuestionInput, Screen},
    session::IdentityField,
};

#[derive(Default)]
struct ScreenLog {
    titles: Vec<String>,
}

impl Presenter for ScreenLog {
    fn present(&mut self, screen: Screen<'_>) {
        let label = match screen {
            Screen::Loading { .. } => "loading".to_string(),
            Screen::AssessmentList { rows, cursor, .. } => format!("list:{}", rows[cursor]),
            Screen::TextEntry { prompt, value, .. } => format!("entry:{prompt}={value}"),
            Screen::Question {
                number,
                total,
                input,
                ..
            } => match input {
                QuestionInput::Choice { pending, confirmed, .. } => {
                    format!("q{number}/{total}:{pending:?}:{confirmed:?}")
                }
                QuestionInput::Text { draft, .. } => format!("q{number}/{total}:text:{draft}"),
            },
            Screen::PauseMenu { items, cursor, .. } => format!("pause:{}", items[cursor]),
            Screen::AnswerSheet { cursor, .. } => format!("sheet:{cursor}"),
            Screen::Submitting { .. } => "submitting".to_string(),
            Screen::Result { score, total, .. } => format!("result:{score}/{total}"),
            Screen::Review { number, .. } => format!("review:{number}"),
            Screen::Complete { .. } => "complete".to_string(),
            Screen::Error { message } => format!("error:{message}"),
        };
        self.titles.push(label);
    }
}

struct Board<S> {
    session: S,
    input: MockInput,
    log: ScreenLog,
    now: u64,
}

impl<K: AssessmentKind> Board<SessionEngine<K, StaticContentSource, SilentFeedback>> {
    fn frame(&mut self) -> InputFrame {
        self.input.sample().unwrap()
    }

    fn run(&mut self, frame: InputFrame) {
        if self.session.tick(self.now, &frame) == TickResult::RenderRequested {
            self.session.present(self.now, &mut self.log);
        }
        self.now += 20;
    }

    fn idle(&mut self) {
        let frame = self.frame();
        self.run(frame);
    }

    fn press(&mut self, button: Button) {
        let frame = self.frame().with_button(button, true);
        self.run(frame);
        self.now += 300;
        self.idle();
        self.now += 300;
    }

    fn key(&mut self, code: u8) {
        let frame = self.frame().with_key(code);
        self.run(frame);
    }

    fn type_text(&mut self, text: &str) {
        text.bytes().for_each(|code| self.key(code));
    }

    fn last_screen(&self) -> &str {
        self.log.titles.last().map(String::as_str).unwrap_or("")
    }
}

#[test]
fn sample_exam_runs_to_completion() {
    let mut board = Board {
        session: ExamSession::new(
            default_sample_source(),
            SilentFeedback,
            SessionConfig::default(),
        ),
        input: MockInput::with_dial(2_000),
        log: ScreenLog::default(),
        now: 0,
    };

    board.idle();
    assert_eq!(board.last_screen(), "loading");
    board.idle();
    assert_eq!(board.last_screen(), "list:Biology warm-up");

    board.press(Button::A);
    assert_eq!(
        board.session.state(),
        SessionState::CollectingIdentity(IdentityField::Name)
    );
    board.type_text("Grace");
    board.key(keycode::ENTER);
    board.type_text("7");
    board.key(keycode::ENTER);
    board.idle();
    assert_eq!(board.session.state(), SessionState::Running);
    assert_eq!(board.session.remaining_secs(board.now), Some(300));

    // Q1: Mitochondria (B), Q2: T (D), Q3: wrong on purpose (B).
    board.press(Button::B);
    board.press(Button::B);
    assert_eq!(board.last_screen(), "q1/3:None:Some(1)");
    board.key(keycode::RIGHT);
    board.press(Button::D);
    board.press(Button::D);
    board.key(keycode::RIGHT);
    board.press(Button::B);
    board.press(Button::B);

    board.key(keycode::ENTER);
    board.idle();
    assert_eq!(board.session.state(), SessionState::ShowingResult);
    assert_eq!(board.last_screen(), "result:2/3");

    let posts = board.session.content().posts();
    assert_eq!(posts.len(), 1);
    assert!(
        String::from_utf8_lossy(&posts[0].1).contains(r#""answers":[1,3,1]"#),
        "unexpected upload body"
    );

    board.press(Button::A);
    assert!(board.session.state().is_closed());
    assert_eq!(board.session.exit(), Some(SessionExit::Completed));
}

#[test]
fn sample_quiz_mixes_choice_and_typed_answers() {
    let mut board = Board {
        session: QuizSession::new(
            default_sample_source(),
            SilentFeedback,
            SessionConfig::default().with_overview_rows(3),
        ),
        input: MockInput::new(),
        log: ScreenLog::default(),
        now: 0,
    };

    board.idle();
    board.idle();
    board.press(Button::A);
    board.idle();
    assert_eq!(board.session.state(), SessionState::Running);
    assert_eq!(board.session.remaining_secs(board.now), None);

    board.press(Button::B);
    board.press(Button::B);
    board.key(b'n');
    board.type_text("PARIS");
    assert!(board.last_screen().starts_with("q2/2:text:PARIS"));
    board.key(keycode::ENTER);

    board.key(keycode::ESCAPE);
    assert_eq!(board.last_screen(), "pause:Resume");
    board.key(keycode::DOWN);
    board.key(keycode::ENTER);
    assert_eq!(board.last_screen(), "sheet:1");
    board.key(keycode::ESCAPE);
    assert_eq!(board.last_screen(), "pause:View All");
    board.key(keycode::DOWN);
    board.key(keycode::ENTER);

    assert_eq!(board.last_screen(), "result:2/2");
    assert!(board.session.content().posts().is_empty());

    board.key(b'r');
    assert_eq!(board.last_screen(), "review:1");
    board.key(keycode::ESCAPE);
    assert!(!board.session.state().is_closed());
    board.key(keycode::ESCAPE);
    assert_eq!(board.session.exit(), Some(SessionExit::Completed));
}
