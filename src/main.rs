use clap::Parser;
use ddg_vis::adapters::outbound::console::StderrProgressReporter;
use ddg_vis::adapters::outbound::filesystem::FileSystemReader;
use ddg_vis::adapters::outbound::navigation::{
    QueryStringNavigation, OPERATION_PARAM, SERVICE_PARAM,
};
use ddg_vis::application::dto::GraphRequest;
use ddg_vis::application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use ddg_vis::application::read_models::GraphReadModelBuilder;
use ddg_vis::application::use_cases::ResolveVisibleGraphUseCase;
use ddg_vis::cli::Args;
use ddg_vis::config::{self, CliOverrides, ConfigFile};
use ddg_vis::ports::outbound::{NavigationState, ProgressReporter};
use ddg_vis::shared::error::ExitCode;
use ddg_vis::shared::Result;
use std::path::Path;
use std::process;

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // --help and --version also come through here
            let code = if e.use_stderr() {
                ExitCode::InvalidArguments
            } else {
                ExitCode::Success
            };
            let _ = e.print();
            process::exit(code.as_i32());
        }
    };

    if let Err(e) = run(args) {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\nCaused by: {}", err);
            source = err.source();
        }

        eprintln!();
        process::exit(ExitCode::ApplicationError.as_i32());
    }
}

fn run(args: Args) -> Result<()> {
    let config = load_config(&args)?;
    let settings = config::merge(
        config.as_ref(),
        CliOverrides {
            format: args.format,
            key_error_policy: args.on_malformed_key,
            hops: args.hops,
            show: args.show,
            hide: args.hide,
        },
    )?;

    // Navigation state: an explicit query, or a fresh one for the focal node
    let mut navigation = match args.query.as_deref() {
        Some(query) => QueryStringNavigation::parse(query)?,
        None => QueryStringNavigation::new(),
    };
    let service = args
        .service
        .or_else(|| navigation.get(SERVICE_PARAM).map(str::to_string));
    let operation = args
        .operation
        .or_else(|| navigation.get(OPERATION_PARAM).map(str::to_string));

    // Keep the focal node in the navigation state so the shared link reproduces the view
    if let Some(service) = service.as_deref() {
        if args.query.is_none() {
            navigation = QueryStringNavigation::for_focal(service, operation.as_deref());
        } else {
            navigation.set(SERVICE_PARAM, service);
            if let Some(operation) = operation.as_deref() {
                navigation.set(OPERATION_PARAM, operation);
            }
        }
    }
    if let Some(key) = args.visibility_key.as_deref() {
        navigation.replace_visibility_key(key)?;
    }

    let mut builder = GraphRequest::builder()
        .payload_path(args.payload)
        .operation(operation)
        .hops(settings.hops)
        .show(settings.show)
        .hide(settings.hide)
        .key_error_policy(settings.key_error_policy);
    if let Some(service) = service {
        builder = builder.service(service);
    }
    let request = builder.build()?;

    // Create adapters (Dependency Injection)
    let payload_reader = FileSystemReader::new();
    let progress_reporter = StderrProgressReporter::new();
    let use_case = ResolveVisibleGraphUseCase::new(payload_reader, progress_reporter);

    let response = use_case.execute(request, &mut navigation)?;

    let read_model = GraphReadModelBuilder::build(
        response.graph_model.model(),
        &response.graph,
        &response.visibility_key,
        &response.navigation_query,
    );

    eprintln!("{}", FormatterFactory::progress_message(settings.format));
    let formatter = FormatterFactory::create(settings.format);
    let formatted_output = formatter.format(&read_model)?;

    let presenter = PresenterFactory::create(PresenterType::from_output(args.output));
    presenter.present(&formatted_output)?;

    StderrProgressReporter::new().report_completion(&format!(
        "🔗 Navigation state: ?{}",
        response.navigation_query
    ));

    Ok(())
}

/// Explicit --config wins; otherwise look next to the payload file
fn load_config(args: &Args) -> Result<Option<ConfigFile>> {
    if let Some(path) = args.config.as_deref() {
        let config = config::load_config_from_path(path)?;
        eprintln!("📄 Loaded config file: {}", path.display());
        return Ok(Some(config));
    }

    let dir = args
        .payload
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let config = config::discover_config(dir)?;
    if config.is_some() {
        eprintln!(
            "📄 Auto-discovered config file: {}",
            dir.join(config::CONFIG_FILENAME).display()
        );
    }
    Ok(config)
}
