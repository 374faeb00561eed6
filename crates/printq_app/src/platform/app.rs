use anyhow::Context;
use chrono::{DateTime, Local};
use clap::Parser;
use crossterm::event::{self, Event};
use printq_core::{update, AppState, Msg};
use printq_engine::EngineHandle;
use printq_logging::{printq_error, printq_info};

use super::config::{self, Cli};
use super::effects::EffectRunner;
use super::logging;
use super::ui::{self, keys::Input, Tui};

pub fn run_app() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = config::load(&cli)?;
    if cli.print_config {
        println!("{}", config.to_ron()?);
        return Ok(());
    }
    let settings = config.settings()?;

    logging::initialize(settings.log_destination, settings.log_level);
    printq_info!("Starting printq against {}", settings.api.base_url);

    let engine = EngineHandle::with_settings(&settings.api)
        .with_context(|| format!("could not start the job engine for {:?}", settings.api.base_url))?;
    let mut app = App::new(AppState::with_schema(settings.schema), EffectRunner::new(engine));

    let mut terminal = ui::init_terminal().context("failed to set up terminal")?;
    let result = app.event_loop(&mut terminal);
    if let Err(err) = ui::restore_terminal(&mut terminal) {
        printq_error!("Failed to restore terminal: {}", err);
    }

    printq_info!("printq exited");
    result
}

struct App {
    state: AppState,
    runner: EffectRunner,
    last_sync: Option<DateTime<Local>>,
}

impl App {
    fn new(state: AppState, runner: EffectRunner) -> Self {
        Self {
            state,
            runner,
            last_sync: None,
        }
    }

    fn event_loop(&mut self, terminal: &mut Tui) -> anyhow::Result<()> {
        self.dispatch_msg(Msg::Mounted);
        let mut redraw = true;

        loop {
            for msg in self.runner.poll() {
                let applied = self.state.applied_results();
                self.dispatch_msg(msg);
                if self.state.applied_results() != applied {
                    self.last_sync = Some(Local::now());
                }
            }

            if self.state.consume_dirty() || redraw {
                let view = self.state.view();
                let last_sync = self
                    .last_sync
                    .map(|at| at.format("%H:%M:%S").to_string());
                terminal.draw(|frame| ui::render::render(frame, &view, last_sync.as_deref()))?;
                redraw = false;
            }

            if !event::poll(ui::constants::TICK)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) => {
                    let view = self.state.view();
                    match ui::keys::map_key(key, &view.form) {
                        Some(Input::Msg(msg)) => self.dispatch_msg(msg),
                        Some(Input::Quit) => {
                            self.dispatch_msg(Msg::Unmounted);
                            return Ok(());
                        }
                        None => {}
                    }
                }
                Event::Resize(..) => redraw = true,
                _ => {}
            }
        }
    }

    fn dispatch_msg(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.run(effects);
    }
}
