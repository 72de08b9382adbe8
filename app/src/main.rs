use std::process::ExitCode;

use xml3d_export::ExportArgs;

fn main() -> ExitCode {
    let args = ExportArgs::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_filter()))
        .init();

    match xml3d_export::run(&args) {
        Ok(stats) => {
            println!("{stats}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Export failed: {e}");
            ExitCode::FAILURE
        }
    }
}
