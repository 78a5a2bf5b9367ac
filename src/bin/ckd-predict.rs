//! Headless front end: fill the prediction form from flags and submit it once.

use std::time::Duration;

use ckd_predictor::config::{self, BackendUrl};
use ckd_predictor::egui_app::controller::EguiController;
use ckd_predictor::egui_app::view_model::OutcomePanel;
use ckd_predictor::logging::{self, LogTarget};
use ckd_predictor::prediction::FormField;

/// How long the CLI waits for an answer before giving up on printing it.
const MAX_WAIT: Duration = Duration::from_secs(300);

fn main() {
    if let Err(err) = logging::init(LogTarget::Terminal) {
        eprintln!("Logging disabled: {err}");
    }
    match run(std::env::args().skip(1).collect()) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}

struct Options {
    values: Vec<(FormField, String)>,
    backend_url: Option<String>,
    save_backend_url: Option<String>,
}

fn run(args: Vec<String>) -> Result<bool, String> {
    let Some(options) = parse_args(args)? else {
        return Ok(true);
    };
    if let Some(raw) = &options.save_backend_url {
        let url = BackendUrl::parse(raw).map_err(|err| err.to_string())?;
        let path = config::save_backend_url(&url).map_err(|err| err.to_string())?;
        println!("Saved backend URL {url} to {}", path.display());
        if options.values.is_empty() {
            return Ok(true);
        }
    }
    let config = match options.backend_url {
        Some(url) => config::AppConfig {
            backend_url: BackendUrl::parse(&url).map_err(|err| err.to_string())?,
        },
        None => config::load().map_err(|err| err.to_string())?,
    };

    let mut controller = EguiController::from_config(&config);
    for (field, value) in options.values {
        controller.update_field(field, value);
    }
    let rejected = controller.form().rejected_fields();
    if !rejected.is_empty() {
        let names = rejected
            .iter()
            .map(|field| format!("--{} ({})", field.key(), field.spec().label))
            .collect::<Vec<_>>()
            .join(", ");
        return Err(format!("Missing or out-of-range values: {names}"));
    }

    controller.submit();
    if !controller.wait_for_prediction(MAX_WAIT) {
        return Err("Timed out waiting for the prediction service".to_string());
    }
    match controller.view().outcome {
        Some(OutcomePanel::Result(panel)) => {
            println!("{}", panel.heading);
            println!("{}", panel.message);
            Ok(true)
        }
        Some(OutcomePanel::Error(panel)) => {
            eprintln!("{}: {}", panel.heading, panel.message);
            Ok(false)
        }
        None => Err("Prediction finished without a result".to_string()),
    }
}

fn parse_args(args: Vec<String>) -> Result<Option<Options>, String> {
    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        print_help();
        return Ok(None);
    }
    let mut values = Vec::new();
    let mut backend_url = None;
    let mut save_backend_url = None;
    let mut it = args.into_iter();
    while let Some(arg) = it.next() {
        let Some(name) = arg.strip_prefix("--") else {
            return Err(format!("Unknown argument: {arg}"));
        };
        let value = it
            .next()
            .ok_or_else(|| format!("Missing value for {arg}"))?;
        match name {
            "backend-url" => {
                backend_url = Some(value);
                continue;
            }
            "save-backend-url" => {
                save_backend_url = Some(value);
                continue;
            }
            _ => {}
        }
        let field = name
            .parse::<FormField>()
            .map_err(|_| format!("Unknown argument: {arg}"))?;
        values.push((field, value));
    }
    Ok(Some(Options {
        values,
        backend_url,
        save_backend_url,
    }))
}

fn print_help() {
    println!(
        "Usage: ckd-predict --sg <1.0-1.1> --al <0-5> --sc <0-10> --hemo <0-20> --pcv <0-100> --htn <0|1> [--backend-url <url>]"
    );
    println!();
    println!("       ckd-predict --save-backend-url <url>");
    println!();
    println!("Without --backend-url the URL comes from CKD_BACKEND_URL or config.toml.");
    println!("--save-backend-url writes the URL to config.toml for later runs.");
}
