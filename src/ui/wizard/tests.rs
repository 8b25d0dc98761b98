//! Tests for wizard key handling

use super::*;
use crate::workflow::{WorkflowState, WorkflowStep};
use crossterm::event::KeyCode;

fn state_at(step: WorkflowStep) -> WorkflowState {
    let mut state = WorkflowState::initial();
    state.step = step;
    state.seed_keyword = "digital marketing".to_string();
    state.keywords = vec![
        "seo tips".to_string(),
        "content writing".to_string(),
        "email outreach".to_string(),
    ];
    state.selected_keyword = "seo tips".to_string();
    state.titles = vec!["10 SEO Tips".to_string(), "The SEO Playbook".to_string()];
    state.selected_title = "10 SEO Tips".to_string();
    state.topics = "First angle\n\nSecond angle".to_string();
    state.selected_topic = "First angle".to_string();
    state.content = "Body".to_string();
    state
}

#[test]
fn test_seed_typing_then_enter_submits() {
    let mut screen = WizardScreen::new();
    let state = state_at(WorkflowStep::SeedInput);

    for c in "seo".chars() {
        assert_eq!(
            screen.handle_key(KeyCode::Char(c), &state),
            WizardCommand::None
        );
    }
    assert_eq!(
        screen.handle_key(KeyCode::Enter, &state),
        WizardCommand::SubmitSeed("seo".to_string())
    );
}

#[test]
fn test_seed_enter_submits_even_when_blank() {
    // Validation lives in the controller; the screen forwards as typed
    let mut screen = WizardScreen::new();
    let state = state_at(WorkflowStep::SeedInput);

    assert_eq!(
        screen.handle_key(KeyCode::Enter, &state),
        WizardCommand::SubmitSeed(String::new())
    );
}

#[test]
fn test_seed_esc_quits() {
    let mut screen = WizardScreen::new();
    let state = state_at(WorkflowStep::SeedInput);

    assert_eq!(screen.handle_key(KeyCode::Esc, &state), WizardCommand::Quit);
}

#[test]
fn test_busy_only_allows_restart_and_quit() {
    let mut screen = WizardScreen::new();
    let mut state = state_at(WorkflowStep::KeywordChoice);
    state.busy = true;

    assert_eq!(
        screen.handle_key(KeyCode::Enter, &state),
        WizardCommand::None
    );
    assert_eq!(
        screen.handle_key(KeyCode::Char('x'), &state),
        WizardCommand::None
    );
    assert_eq!(
        screen.handle_key(KeyCode::Char('r'), &state),
        WizardCommand::Reset
    );
    assert_eq!(
        screen.handle_key(KeyCode::Char('q'), &state),
        WizardCommand::Quit
    );
}

#[test]
fn test_keyword_navigation_wraps() {
    let mut screen = WizardScreen::new();
    let state = state_at(WorkflowStep::KeywordChoice);

    screen.handle_key(KeyCode::Down, &state);
    screen.handle_key(KeyCode::Down, &state);
    screen.handle_key(KeyCode::Down, &state);
    assert_eq!(
        screen.handle_key(KeyCode::Enter, &state),
        WizardCommand::ChooseKeyword("seo tips".to_string())
    );

    screen.handle_key(KeyCode::Up, &state);
    assert_eq!(
        screen.handle_key(KeyCode::Enter, &state),
        WizardCommand::ChooseKeyword("email outreach".to_string())
    );
}

#[test]
fn test_enter_chooses_highlighted_title() {
    let mut screen = WizardScreen::new();
    let state = state_at(WorkflowStep::TitleChoice);

    screen.handle_key(KeyCode::Char('j'), &state);
    assert_eq!(
        screen.handle_key(KeyCode::Enter, &state),
        WizardCommand::ChooseTitle("The SEO Playbook".to_string())
    );
}

#[test]
fn test_topic_enter_returns_selected_segment() {
    let mut screen = WizardScreen::new();
    let state = state_at(WorkflowStep::TopicChoice);

    assert_eq!(
        screen.handle_key(KeyCode::Enter, &state),
        WizardCommand::ChooseTopic("First angle".to_string())
    );

    screen.handle_key(KeyCode::Down, &state);
    assert_eq!(
        screen.handle_key(KeyCode::Enter, &state),
        WizardCommand::ChooseTopic("Second angle".to_string())
    );
}

#[test]
fn test_esc_goes_back_one_step() {
    let mut screen = WizardScreen::new();

    assert_eq!(
        screen.handle_key(KeyCode::Esc, &state_at(WorkflowStep::KeywordChoice)),
        WizardCommand::GoBack(WorkflowStep::SeedInput)
    );
    assert_eq!(
        screen.handle_key(KeyCode::Esc, &state_at(WorkflowStep::TitleChoice)),
        WizardCommand::GoBack(WorkflowStep::KeywordChoice)
    );
    assert_eq!(
        screen.handle_key(KeyCode::Esc, &state_at(WorkflowStep::TopicChoice)),
        WizardCommand::GoBack(WorkflowStep::TitleChoice)
    );
    assert_eq!(
        screen.handle_key(KeyCode::Esc, &state_at(WorkflowStep::Result)),
        WizardCommand::GoBack(WorkflowStep::TopicChoice)
    );
}

#[test]
fn test_result_action_keys() {
    let mut screen = WizardScreen::new();
    let state = state_at(WorkflowStep::Result);

    assert_eq!(
        screen.handle_key(KeyCode::Char('c'), &state),
        WizardCommand::CopyContent
    );
    assert_eq!(
        screen.handle_key(KeyCode::Char('s'), &state),
        WizardCommand::ExportContent
    );
    assert_eq!(
        screen.handle_key(KeyCode::Char('r'), &state),
        WizardCommand::Reset
    );
    assert_eq!(
        screen.handle_key(KeyCode::Char('L'), &state),
        WizardCommand::SignOut
    );
    assert_eq!(
        screen.handle_key(KeyCode::Char('q'), &state),
        WizardCommand::Quit
    );
}

#[test]
fn test_result_scroll_saturates_at_top() {
    let mut screen = WizardScreen::new();
    let state = state_at(WorkflowStep::Result);

    screen.handle_key(KeyCode::Up, &state);
    assert_eq!(screen.result_scroll, 0);

    screen.handle_key(KeyCode::Down, &state);
    screen.handle_key(KeyCode::Down, &state);
    assert_eq!(screen.result_scroll, 2);

    screen.handle_key(KeyCode::Up, &state);
    assert_eq!(screen.result_scroll, 1);
}

#[test]
fn test_selection_clamped_when_list_shrinks() {
    let mut list = ListState::default();
    list.select(Some(5));

    ensure_selection(&mut list, 2);
    assert_eq!(list.selected(), Some(0));

    ensure_selection(&mut list, 0);
    assert_eq!(list.selected(), None);
}

#[test]
fn test_reset_for_new_run_clears_presentation_state() {
    let mut screen = WizardScreen::new();
    let state = state_at(WorkflowStep::SeedInput);

    for c in "coffee".chars() {
        screen.handle_key(KeyCode::Char(c), &state);
    }
    let result_state = state_at(WorkflowStep::Result);
    screen.handle_key(KeyCode::Down, &result_state);

    screen.reset_for_new_run();
    assert!(screen.seed_input.is_blank());
    assert_eq!(screen.result_scroll, 0);
    assert_eq!(screen.keyword_state.selected(), Some(0));
}
