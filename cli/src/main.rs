mod commands;
mod terminal;

use commands::{CommandLine, Commands, hosts, ports};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let command_line = CommandLine::parse_args();

    logging::init(command_line.quiet);
    print::banner(command_line.quiet);

    match command_line.command {
        Commands::Hosts {
            ref range,
            method,
            timeout,
        } => {
            print::header("host discovery", command_line.quiet);
            hosts::run(range, method, timeout, &command_line).await
        }
        Commands::Ports {
            ref target,
            ref ports,
            timeout,
        } => {
            print::header("port scan", command_line.quiet);
            ports::run(target, ports, timeout, &command_line).await
        }
    }
}
