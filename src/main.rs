fn main() {
    use swift_module_graph::cli::parse;
    let cli = parse();
    swift_module_graph::logger::init_logger(cli.verbose, cli.quiet, cli.no_color);
    let code = swift_module_graph::app::run_cli(cli);
    if code != 0 {
        std::process::exit(code);
    }
}
