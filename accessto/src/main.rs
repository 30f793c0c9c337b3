use accessto::app::{AccesstoApp, AccesstoAppError};
use clap::Parser;

fn main() -> Result<(), AccesstoAppError> {
    env_logger::init();
    let args = AccesstoApp::parse();
    args.op.run()
}
