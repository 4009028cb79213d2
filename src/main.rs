use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use cfn_sub_vars::config::{
	CONFIG_FILE_NAME, DelimiterOverrides, discover_configs, generate_init_template,
	merge_configs, resolve_delimiters, user_config_path,
};
use cfn_sub_vars::rewrite::{ChangeLogEntry, Rewriter};
use cfn_sub_vars::template::{
	TemplateFormat, detect_format, load_template, render_template, write_template,
};

#[derive(Parser)]
#[command(name = "cfn-sub")]
#[command(
	author,
	version,
	about = "Convert #{Var} placeholders in CloudFormation templates into Fn::Sub expressions"
)]
#[command(arg_required_else_help = true)]
struct Cli {
	#[command(subcommand)]
	command: Option<Commands>,

	/// Create a template .cfnsub.toml in the current directory
	#[arg(long)]
	init: bool,

	/// Overwrite existing .cfnsub.toml when using --init
	#[arg(long, requires = "init")]
	force: bool,

	/// Template file to rewrite (JSON or YAML)
	template: Option<PathBuf>,

	#[command(flatten)]
	delimiters: DelimiterArgs,

	/// Write the rewritten template to this file instead of stdout
	#[arg(short, long, value_name = "PATH", conflicts_with = "in_place")]
	output: Option<PathBuf>,

	/// Overwrite the input template
	#[arg(long)]
	in_place: bool,

	/// Template format (detected from the file extension by default)
	#[arg(long, value_name = "FORMAT")]
	format: Option<TemplateFormat>,

	/// Emit compact JSON instead of pretty-printed JSON
	#[arg(long)]
	compact: bool,

	/// Report the changes without writing anything
	#[arg(long, conflicts_with_all = ["output", "in_place"])]
	dry_run: bool,

	/// Do not print the list of rewritten values
	#[arg(short, long)]
	quiet: bool,

	/// Enable debug logging
	#[arg(short, long, global = true)]
	verbose: bool,
}

#[derive(clap::Args)]
struct DelimiterArgs {
	/// Placeholder prefix (default "#{")
	#[arg(long, value_name = "PREFIX", global = true, allow_hyphen_values = true)]
	prefix: Option<String>,

	/// Placeholder suffix (default "}")
	#[arg(long, value_name = "SUFFIX", global = true, allow_hyphen_values = true)]
	suffix: Option<String>,
}

impl DelimiterArgs {
	fn overrides(&self) -> DelimiterOverrides {
		DelimiterOverrides {
			prefix: self.prefix.clone(),
			suffix: self.suffix.clone(),
		}
	}
}

#[derive(Subcommand)]
enum Commands {
	/// Configuration management commands
	Config {
		#[command(subcommand)]
		action: ConfigAction,
	},
}

#[derive(Subcommand)]
enum ConfigAction {
	/// Display the effective delimiters and where each value came from
	Show,
	/// Check all config files for errors without rewriting anything
	Validate,
}

fn main() -> ExitCode {
	let cli = Cli::parse();
	init_logging(cli.verbose);
	init_color();

	match run(cli) {
		Ok(code) => code,
		Err(e) => {
			eprintln!("{} {e:?}", "error:".red().bold());
			ExitCode::FAILURE
		}
	}
}

/// Reports go to stderr, so color follows stderr rather than stdout.
fn init_color() {
	if !std::io::stderr().is_terminal() {
		colored::control::set_override(false);
	}
}

fn init_logging(verbose: bool) {
	let filter = if verbose {
		EnvFilter::new("debug")
	} else {
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
	};

	tracing_subscriber::registry()
		.with(filter)
		.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
		.init();
}

fn run(cli: Cli) -> Result<ExitCode> {
	if cli.init {
		return handle_init(cli.force);
	}

	if let Some(ref command) = cli.command {
		let overrides = cli.delimiters.overrides();
		return match command {
			Commands::Config { action } => match action {
				ConfigAction::Show => handle_config_show(&overrides),
				ConfigAction::Validate => handle_config_validate(&overrides),
			},
		};
	}

	if let Some(ref template) = cli.template {
		return handle_rewrite(template, &cli);
	}

	// No template specified - this shouldn't happen due to arg_required_else_help
	Ok(ExitCode::SUCCESS)
}

fn handle_init(force: bool) -> Result<ExitCode> {
	let config_path = PathBuf::from(CONFIG_FILE_NAME);

	if config_path.exists() && !force {
		anyhow::bail!("{} already exists. Use --force to overwrite.", CONFIG_FILE_NAME);
	}

	std::fs::write(&config_path, generate_init_template())
		.with_context(|| format!("Failed to write {}", config_path.display()))?;

	println!("Created {}", CONFIG_FILE_NAME);
	Ok(ExitCode::SUCCESS)
}

fn handle_rewrite(template_path: &Path, cli: &Cli) -> Result<ExitCode> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;

	let resolved = resolve_delimiters(&cwd, &cli.delimiters.overrides())
		.context("Failed to resolve placeholder delimiters")?;

	let format = detect_format(template_path, cli.format)?;
	let mut template = load_template(template_path, format)
		.with_context(|| format!("Failed to load template: {}", template_path.display()))?;

	let rewriter = Rewriter::new(&resolved.delimiters)?;

	if !cli.quiet {
		report_line(&format!(
			"Converting {}...{} placeholders into Fn::Sub",
			resolved.delimiters.prefix, resolved.delimiters.suffix
		));
	}

	let changes = rewriter
		.rewrite(&mut template)
		.with_context(|| format!("Failed to rewrite template: {}", template_path.display()))?;

	if !cli.quiet {
		report_changes(&changes);
	}

	if cli.dry_run {
		return Ok(ExitCode::SUCCESS);
	}

	let pretty = !cli.compact;
	let destination = if cli.in_place {
		Some(template_path.to_path_buf())
	} else {
		cli.output.clone()
	};

	match destination {
		Some(path) => {
			let out_format = cli
				.format
				.or_else(|| TemplateFormat::from_path(&path))
				.unwrap_or(format);
			write_template(&path, &template, out_format, pretty)
				.with_context(|| format!("Failed to write template: {}", path.display()))?;
		}
		None => {
			print!("{}", render_template(&template, format, pretty)?);
		}
	}

	Ok(ExitCode::SUCCESS)
}

fn report_line(message: &str) {
	eprintln!("{} {}", "cfn-sub:".bold(), message.yellow());
}

fn report_changes(changes: &[ChangeLogEntry]) {
	for change in changes {
		report_line(&format!(" - {}", change));
	}

	let noun = if changes.len() == 1 { "value" } else { "values" };
	report_line(&format!("{} {} converted", changes.len(), noun));
}

fn handle_config_show(overrides: &DelimiterOverrides) -> Result<ExitCode> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;
	let configs = discover_configs(&cwd).context("Failed to discover config files")?;

	if configs.is_empty() {
		println!("No configuration files found.");
	} else {
		println!("Configuration files (in cascade order):\n");
		for loaded in &configs {
			println!("# Source: {}", loaded.path.display());
			println!("# root: {}", loaded.config.root);
			if let Some(ref prefix) = loaded.config.prefix {
				println!("# prefix: {}", prefix);
			}
			if let Some(ref suffix) = loaded.config.suffix {
				println!("# suffix: {}", suffix);
			}
			println!();
		}
	}

	let resolved = merge_configs(&configs).with_overrides(overrides);
	resolved
		.delimiters
		.validate()
		.context("Failed to resolve placeholder delimiters")?;
	println!("Effective delimiters:");
	println!(
		"  prefix: {} ({})",
		resolved.delimiters.prefix, resolved.prefix_source
	);
	println!(
		"  suffix: {} ({})",
		resolved.delimiters.suffix, resolved.suffix_source
	);

	if let Ok(user_path) = user_config_path() {
		println!("User config path: {}", user_path.display());
		if user_path.exists() {
			println!("  (exists)");
		} else {
			println!("  (not found)");
		}
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_config_validate(overrides: &DelimiterOverrides) -> Result<ExitCode> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;

	let configs = match discover_configs(&cwd) {
		Ok(configs) => configs,
		Err(e) => {
			eprintln!("Configuration error: {}", e);
			return Ok(ExitCode::FAILURE);
		}
	};

	let resolved = merge_configs(&configs).with_overrides(overrides);
	if let Err(e) = resolved.delimiters.validate() {
		eprintln!("Configuration error: {}", e);
		return Ok(ExitCode::FAILURE);
	}

	if configs.is_empty() {
		println!("No configuration files found.");
	} else {
		println!("All configuration files are valid:");
		for loaded in &configs {
			println!("  {}", loaded.path.display());
		}
	}

	Ok(ExitCode::SUCCESS)
}
