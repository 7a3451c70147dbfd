use std::sync::{mpsc, Arc};

use farm_core::{update, ConsoleState, Msg};
use farm_engine::{EngineHandle, Gateway, ReqwestGateway};
use farm_logging::{farm_debug, farm_info};

use super::command::{self, Input, HELP};
use super::config::ConsoleConfig;
use super::effects::{self, EffectRunner};
use super::notifier::TerminalNotifier;
use super::render;
use super::AppError;

pub fn run_app(config: &ConsoleConfig) -> Result<(), AppError> {
    let gateway = Arc::new(ReqwestGateway::new(
        config.gateway_settings(),
        Arc::new(TerminalNotifier),
    )?);
    let (engine, events) = EngineHandle::start(gateway.clone() as Arc<dyn Gateway>)?;
    let runner = EffectRunner::new(engine, config.poll_interval());

    let (input_tx, input_rx) = mpsc::channel::<Input>();
    effects::spawn_event_loop(events, input_tx.clone())?;
    command::spawn_reader(input_tx.clone())?;
    input_tx.send(Input::Msg(Msg::Init)).ok();
    drop(input_tx);

    println!("farm console on {}; type `help` for commands", config.base_url);

    let mut state = ConsoleState::new();
    while let Ok(input) = input_rx.recv() {
        let msg = match input {
            Input::Msg(msg) => msg,
            Input::Show(listing) => {
                let text = render::listing(&state.view(), listing, |render_id, file| {
                    gateway
                        .render_file_url(render_id, file)
                        .ok()
                        .map(String::from)
                });
                print!("{text}");
                continue;
            }
            Input::Help => {
                println!("{HELP}");
                continue;
            }
            Input::Unknown(reason) => {
                println!("{reason}");
                continue;
            }
        };

        let shutting_down = msg == Msg::Shutdown;
        farm_debug!("Handling {:?}", msg);
        let (next, effects) = update(state, msg);
        state = next;
        runner.enqueue(effects);

        if state.consume_dirty() {
            println!("{}", render::status_line(&state.view()));
        }
        if shutting_down {
            break;
        }
    }

    farm_info!("Console session ended");
    Ok(())
}
