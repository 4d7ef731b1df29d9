use clap::Parser;
use folio::cli::{self, Cli, Commands};

fn main() -> anyhow::Result<()> {
    // 解析命令行参数
    let cli = Cli::parse();

    // 初始化日志
    folio::init(cli.verbose)?;

    let config = cli::load_config(&cli)?;

    // 执行命令
    match cli.command {
        Commands::Page(args) => cli::commands::page(args, &config),
        Commands::Contents(args) => cli::commands::contents(args, &config),
        Commands::Category(args) => cli::commands::category(args, &config),
        Commands::Search(args) => cli::commands::search(args, &config),
    }
}
