// SPDX-License-Identifier: MPL-2.0
use gallery_editor::app::{self, paths, Flags};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const HELP: &str = "\
gallery_editor

USAGE:
    gallery_editor [OPTIONS]

OPTIONS:
    --lang <LOCALE>        UI language (e.g. en-US, fr)
    --config-dir <DIR>     Directory holding settings.toml
    --images-url <URL>     Image list endpoint for this run
    --upload-url <URL>     Upload target for this run
    -h, --help             Print this help
";

fn main() -> iced::Result {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    init_logging();

    let flags = Flags {
        lang: optional_arg(&mut args, "--lang"),
        config_dir: optional_arg(&mut args, "--config-dir"),
        images_url: optional_arg(&mut args, "--images-url"),
        upload_url: optional_arg(&mut args, "--upload-url"),
    };

    let remaining = args.finish();
    if !remaining.is_empty() {
        tracing::warn!(?remaining, "Ignoring unrecognized arguments");
    }

    paths::init_cli_override(flags.config_dir.clone());
    app::run(flags)
}

fn optional_arg(args: &mut pico_args::Arguments, key: &'static str) -> Option<String> {
    match args.opt_value_from_str(key) {
        Ok(value) => value,
        Err(error) => {
            tracing::warn!(key, %error, "Ignoring invalid argument");
            None
        }
    }
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gallery_editor=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
