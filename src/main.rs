mod script;
mod session;
mod setup;
mod undo;

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{bail, Context};
use padroll_core::input::DeviceBinding;
use padroll_core::{ControllerConfig, GamepadController};

use script::ReplayScript;
use session::Session;

const USAGE: &str = "usage:
  padroll replay <script.json>   run recorded controller frames and print the song
  padroll bindings               print the button binding table
  padroll bindings reset         restore default bindings";

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let config = ControllerConfig::load();
    setup::init_logging(&config.log_level);

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["replay", path] => replay(config, Path::new(path)),
        ["bindings"] => bindings(false),
        ["bindings", "reset"] => bindings(true),
        ["help"] | ["--help"] | ["-h"] | [] => {
            println!("{}", USAGE);
            Ok(())
        }
        _ => bail!("unrecognized arguments\n{}", USAGE),
    }
}

fn replay(config: ControllerConfig, path: &Path) -> anyhow::Result<()> {
    let script = ReplayScript::load(path)?;
    let mut session = Session::new(config.track_count);
    let mut controller = GamepadController::new(config, setup::open_binding_store());

    let failures = script::replay(&script, &mut controller, &mut session);
    log::info!(
        "Replayed {} frames ({} failed), {} undo steps",
        script.frames.len(),
        failures,
        session.undo_depth()
    );

    let json = serde_json::to_string_pretty(&session.song);
    let json = json.context("serializing song")?;
    println!("{}", json);
    Ok(())
}

fn bindings(reset: bool) -> anyhow::Result<()> {
    let mut device = DeviceBinding::load(setup::open_binding_store());
    if reset {
        device.reset().context("saving default bindings")?;
    }
    let table: BTreeMap<&str, usize> = device
        .binding()
        .iter()
        .map(|(b, i)| (b.name(), i))
        .collect();
    println!("{}", serde_json::to_string_pretty(&table)?);
    Ok(())
}
