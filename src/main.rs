// SPDX-License-Identifier: MPL-2.0
use gallery_lens::app::{self, Flags};
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let flags = match Flags::from_env() {
        Ok(flags) => flags,
        Err(err) => {
            eprintln!("error: {err}\n\n{}", app::cli::HELP);
            return ExitCode::from(2);
        }
    };

    match app::run(flags).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
