//! Core application

use anyhow::{Context, Result};

use costcenter::{DateRange, FilterCompiler};

use crate::core::cli::{self, Commands, FilterArgs};
use crate::core::config::AppConfig;
use crate::core::constants::{APP_NAME_LOWER, ENV_LOG};
use crate::core::render;
use crate::data::{XlsxBuilder, load_rows};
use crate::domain::{Message, Overview};

pub struct CoreApp {
    pub config: AppConfig,
    pub overview: Overview,
}

impl CoreApp {
    /// Run the application with CLI argument parsing
    pub async fn run() -> Result<()> {
        dotenvy::dotenv().ok();
        Self::init_logging();

        tracing::debug!("Application starting");

        let (cli_config, command) = cli::parse();
        tracing::trace!(command = ?command, "Parsed command");

        let config = AppConfig::load(&cli_config)?;
        let mut app = Self::init(config).await?;
        app.execute(command)
    }

    async fn init(config: AppConfig) -> Result<Self> {
        let rows = load_rows(&config.data.snapshot).await.with_context(|| {
            format!(
                "Failed to load request snapshot: {}",
                config.data.snapshot.display()
            )
        })?;
        tracing::debug!(rows = rows.len(), "Requests loaded");

        let compiler = FilterCompiler::new(config.filter.field_names(), config.filter.search_mode);
        let overview = Overview::new(rows, compiler, config.user.email.as_deref());

        Ok(Self { config, overview })
    }

    fn execute(&mut self, command: Commands) -> Result<()> {
        match command {
            Commands::Search { filter, json } => {
                self.apply_filter(&filter);
                self.overview.go();
                let rows = self.overview.visible_rows();
                if json {
                    println!("{}", serde_json::to_string_pretty(&rows)?);
                } else {
                    render::print_table(self.overview.columns(), &rows);
                }
            }
            Commands::Predicate { filter } => {
                self.apply_filter(&filter);
                let predicate = self.overview.predicate();
                println!("{}", serde_json::to_string_pretty(&predicate)?);
            }
            Commands::Export { filter } => {
                self.apply_filter(&filter);
                self.export()?;
            }
            Commands::Show { request_id } => {
                render::print_message(&self.overview.request_press(&request_id));
                if let Some(row) = self.overview.select(self.overview.find(&request_id)) {
                    render::print_row(self.overview.columns(), row);
                }
            }
            Commands::Create => render::print_message(&self.overview.create_press()),
            Commands::Change => render::print_message(&self.overview.change_extend_press()),
        }
        Ok(())
    }

    /// Copy the command line filter inputs into the filter form
    fn apply_filter(&mut self, args: &FilterArgs) {
        if args.no_current_user {
            self.overview.clear();
        }

        let form = self.overview.form_mut();
        if let Some(ref request_id) = args.request_id {
            form.set_request_id(request_id.as_str());
        }
        if let Some(ref request_type) = args.request_type {
            form.set_request_type(request_type.as_str());
        }
        if let Some(ref status) = args.workflow_status {
            form.set_workflow_status(status.as_str());
        }
        if let Some(ref search) = args.search {
            form.set_global_search(search.as_str());
        }
        for token in args.created_by_tokens() {
            form.add_token(&token);
        }
        for token in args.excluded_tokens() {
            form.remove_token(&token);
        }
        form.set_date_range(DateRange {
            start: args.from,
            end: args.to,
        });
    }

    fn export(&mut self) -> Result<()> {
        let matched = self.overview.go();
        let output_dir = self.config.export.output_dir.clone();

        match self
            .overview
            .export(&self.config.export.file_name, || Ok(XlsxBuilder::new(output_dir)))
        {
            Ok(path) => {
                render::print_exported(matched, &path);
                Ok(())
            }
            Err(e) if e.is_warning() => {
                render::print_message(&Message::Warning(e.to_string()));
                Ok(())
            }
            Err(e) => {
                render::print_message(&Message::Error(e.to_string()));
                Err(e).with_context(|| {
                    format!(
                        "Failed to export {}",
                        self.config.export.output_path().display()
                    )
                })
            }
        }
    }

    fn init_logging() {
        let default_filter = format!("info,{}=info", APP_NAME_LOWER);

        let filter = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or(default_filter);

        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .with_ansi(true)
            .compact()
            .with_env_filter(filter)
            .init();
    }
}
