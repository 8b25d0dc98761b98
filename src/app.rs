use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};

use crate::api::PipelineClient;
use crate::config::Config;
use crate::export;
use crate::identity::{Identity, IdentityProvider, StoredProfileProvider};
use crate::ui::{LandingAction, LandingScreen, WizardCommand, WizardScreen};
use crate::workflow::{SessionController, StageOutcome};

pub struct App {
    config: Config,
    controller: SessionController,
    /// Stage outcomes posted by background generation tasks
    outcome_rx: mpsc::UnboundedReceiver<StageOutcome>,
    identity: Arc<dyn IdentityProvider>,
    identity_rx: watch::Receiver<Option<Identity>>,
    landing: LandingScreen,
    wizard: WizardScreen,
    /// Non-error notice for the status line (copy and export results)
    status_message: Option<String>,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let client = PipelineClient::new(config.api.base_url.clone(), config.request_timeout())?
            .with_content_type(config.api.content_type.clone())
            .with_tone(config.api.tone.clone());

        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        let controller = SessionController::new(Arc::new(client), outcome_tx);

        let identity = StoredProfileProvider::new(config.profile_path());
        let identity_rx = identity.subscribe();

        Ok(Self {
            config,
            controller,
            outcome_rx,
            identity: Arc::new(identity),
            identity_rx,
            landing: LandingScreen::new(),
            wizard: WizardScreen::new(),
            status_message: None,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Main loop
        let tick_rate = Duration::from_millis(self.config.ui.tick_rate_ms);

        while !self.should_quit {
            // Fold in stage outcomes delivered since the last frame
            self.drain_outcomes();

            if self.controller.state().busy {
                self.wizard.tick();
            }

            let signed_in = self.identity_rx.borrow().clone();

            // Draw
            terminal.draw(|f| match &signed_in {
                Some(identity) => self.wizard.render(
                    f,
                    self.controller.state(),
                    self.controller.last_error(),
                    self.status_message.as_deref(),
                    Some(identity),
                ),
                None => self.landing.render(f, self.status_message.as_deref()),
            })?;

            // Handle events
            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, signed_in.is_some()).await;
                    }
                }
            }
        }

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        Ok(())
    }

    fn drain_outcomes(&mut self) {
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.controller.apply(outcome);
        }
    }

    async fn handle_key(&mut self, key: KeyCode, signed_in: bool) {
        if signed_in {
            let command = self.wizard.handle_key(key, self.controller.state());
            self.run_command(command).await;
        } else {
            match self.landing.handle_key(key) {
                LandingAction::SignIn(name) => self.sign_in(&name).await,
                LandingAction::Quit => self.should_quit = true,
                LandingAction::None => {}
            }
        }
    }

    async fn run_command(&mut self, command: WizardCommand) {
        match command {
            WizardCommand::None => {}
            WizardCommand::SubmitSeed(text) => {
                // Failures are recorded on the controller and surface
                // on the status line next frame
                self.status_message = None;
                let _ = self.controller.submit_seed(&text);
            }
            WizardCommand::ChooseKeyword(keyword) => {
                self.status_message = None;
                let _ = self.controller.choose_keyword(&keyword);
            }
            WizardCommand::ChooseTitle(title) => {
                self.status_message = None;
                let _ = self.controller.choose_title(&title);
            }
            WizardCommand::ChooseTopic(segment) => {
                self.status_message = None;
                let _ = self.controller.choose_topic(&segment);
            }
            WizardCommand::GoBack(step) => {
                let _ = self.controller.go_back(step);
            }
            WizardCommand::Reset => {
                self.controller.reset();
                self.wizard.reset_for_new_run();
                self.status_message = None;
            }
            WizardCommand::CopyContent => self.copy_content(),
            WizardCommand::ExportContent => self.export_content(),
            WizardCommand::SignOut => self.sign_out().await,
            WizardCommand::Quit => self.should_quit = true,
        }
    }

    async fn sign_in(&mut self, name: &str) {
        match self.identity.sign_in(name).await {
            Ok(identity) => {
                tracing::info!(account_id = %identity.account_id, "signed in");
                self.landing.name_input.clear();
                self.status_message = None;
            }
            Err(err) => {
                self.status_message = Some(format!("Sign in failed: {}", err));
            }
        }
    }

    async fn sign_out(&mut self) {
        match self.identity.sign_out().await {
            Ok(()) => {
                tracing::info!("signed out");
                self.controller.reset();
                self.wizard.reset_for_new_run();
                self.status_message = None;
            }
            Err(err) => {
                self.status_message = Some(format!("Sign out failed: {}", err));
            }
        }
    }

    fn copy_content(&mut self) {
        let state = self.controller.state();
        match export::copy_to_clipboard(&state.content) {
            Ok(()) => {
                self.status_message = Some("Copied content to clipboard".to_string());
            }
            Err(err) => {
                self.status_message = Some(format!("Copy failed: {}", err));
            }
        }
    }

    fn export_content(&mut self) {
        let state = self.controller.state();
        match export::write_export(
            &self.config.export_path(),
            &state.selected_keyword,
            &state.content,
        ) {
            Ok(path) => {
                self.status_message = Some(format!("Saved {}", path.display()));
            }
            Err(err) => {
                self.status_message = Some(format!("Save failed: {}", err));
            }
        }
    }
}
