//! Command dispatch: each subcommand reads a tree, runs one library call, prints.

use std::fs;
use std::io::{self, Read};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{DisplayStyle, Settings};
use crate::domain::{NodeId, TreeArena, TreeDisplay};
use crate::driver::{AsciiDriver, Driver, LabelFactory};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    debug!(?settings, "settings loaded");
    execute_with_settings(cli, &settings)
}

/// Runs the subcommand against already loaded settings.
pub fn execute_with_settings(cli: &Cli, settings: &Settings) -> CliResult<()> {
    match &cli.command {
        Commands::Fmt { input, check } => cmd_fmt(settings, input, *check),
        Commands::Show { input, style } => {
            cmd_show(settings, input, style.unwrap_or(settings.display))
        }
        Commands::Stats { input } => cmd_stats(settings, input),
        Commands::Path { input, from, to } => cmd_path(settings, input, from, to),
        Commands::Config => {
            output::info(&settings.to_toml()?);
            Ok(())
        }
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}

fn driver(settings: &Settings) -> AsciiDriver<LabelFactory> {
    AsciiDriver::new(LabelFactory).with_line_ending(settings.line_ending)
}

fn read_input(input: &str) -> CliResult<String> {
    if input == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| CliError::io("read stdin", e))?;
        return Ok(buffer);
    }
    fs::read_to_string(input).map_err(|e| CliError::io(format!("read {input}"), e))
}

fn load_tree(settings: &Settings, input: &str) -> CliResult<(TreeArena<String>, NodeId)> {
    let text = read_input(input)?;
    let mut arena = TreeArena::new();
    let root = driver(settings)
        .string_to_node(&mut arena, &text)?
        .ok_or(CliError::EmptyInput)?;
    Ok((arena, root))
}

fn find_label(arena: &TreeArena<String>, root: NodeId, label: &str) -> CliResult<NodeId> {
    arena
        .iter(root)?
        .find(|(_, node)| node.value() == label)
        .map(|(idx, _)| idx)
        .ok_or_else(|| CliError::LabelNotFound(label.to_string()))
}

#[instrument(skip(settings))]
fn cmd_fmt(settings: &Settings, input: &str, check: bool) -> CliResult<()> {
    let text = read_input(input)?;
    let driver = driver(settings);
    let mut arena: TreeArena<String> = TreeArena::new();

    let canonical = match driver.string_to_node(&mut arena, &text)? {
        Some(root) => driver.node_to_string(&arena, root)?,
        None => String::new(),
    };

    if !check {
        output::info(&canonical);
        return Ok(());
    }

    if canonical == text.trim_end_matches(['\r', '\n']) {
        output::success(&format!("{input} is canonical"));
        Ok(())
    } else {
        Err(CliError::NotCanonical(format!(
            "{input} is not in canonical form"
        )))
    }
}

#[instrument(skip(settings))]
fn cmd_show(settings: &Settings, input: &str, style: DisplayStyle) -> CliResult<()> {
    let (arena, root) = load_tree(settings, input)?;
    match style {
        DisplayStyle::Ascii => output::info(&driver(settings).node_to_string(&arena, root)?),
        DisplayStyle::Unicode => print!("{}", arena.to_tree_string(root)?),
    }
    Ok(())
}

#[instrument(skip(settings))]
fn cmd_stats(settings: &Settings, input: &str) -> CliResult<()> {
    let (arena, root) = load_tree(settings, input)?;
    output::action("nodes", &arena.iter(root)?.count());
    output::action("depth", &arena.depth(root)?);
    output::action("leaves", &arena.leaf_nodes(root)?.len());
    Ok(())
}

#[instrument(skip(settings))]
fn cmd_path(settings: &Settings, input: &str, from: &str, to: &str) -> CliResult<()> {
    let (arena, root) = load_tree(settings, input)?;
    let from_idx = find_label(&arena, root, from)?;
    let to_idx = find_label(&arena, root, to)?;

    let path = arena.nodes_along_path(from_idx, to_idx)?;
    debug!(hops = path.len(), "path resolved");
    for idx in path {
        output::info(arena.value(idx)?);
    }
    Ok(())
}
