//! Command line front end.
//!
//! Every command drives a [`LabelDesigner`] the same way an interactive
//! front end would: elements are added through the coordinator and documents
//! go through its save and load paths.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use labelkit_designer::{LabelDesigner, LayoutPrompt, Symbology};
use labelkit_settings::{DesignerSettings, LayoutPreset};

/// Command-line arguments for labelkit.
#[derive(Debug, Clone, Parser)]
#[command(name = "labelkit")]
#[command(about = "Design labels with text, images, barcodes and QR codes")]
#[command(version)]
pub struct Cli {
    /// Designer settings file (TOML or JSON). Defaults to the user config directory.
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Create a sample label with text, a QR code and a barcode
    Sample {
        /// Where to write the label document
        output: PathBuf,

        /// Layout preset name; the first preset when omitted
        #[arg(long)]
        preset: Option<String>,

        /// Content of the text element
        #[arg(long)]
        text: Option<String>,

        /// Image to place on the label
        #[arg(long)]
        image: Option<PathBuf>,

        #[arg(long)]
        author: Option<String>,
    },

    /// Print the element tree of a label document
    Show {
        path: PathBuf,
    },

    /// List the configured layout presets
    Presets,

    /// Write the current designer settings to a file
    InitSettings {
        /// Destination; the default settings path when omitted
        path: Option<PathBuf>,
    },
}

impl Cli {
    pub fn run(&self) -> anyhow::Result<()> {
        let stdout = std::io::stdout();
        self.run_with(&mut stdout.lock())
    }

    /// Run the command, writing human-readable output to `out`.
    pub fn run_with(&self, out: &mut impl Write) -> anyhow::Result<()> {
        let settings = self.load_settings()?;

        match &self.command {
            Command::Sample {
                output,
                preset,
                text,
                image,
                author,
            } => {
                let mut designer = LabelDesigner::new(settings)
                    .with_layout_prompt(Box::new(NamedPresetPrompt::new(preset.clone())));
                build_sample(&mut designer, text.as_deref(), image.as_deref())?;
                if let Some(author) = author {
                    designer.metadata.author = author.clone();
                }
                designer.save_to_file(output)?;
                writeln!(
                    out,
                    "Saved {} elements to {}",
                    designer.element_count(),
                    output.display()
                )?;
            }
            Command::Show { path } => {
                let mut designer = LabelDesigner::new(settings);
                designer.load_from_file(path)?;
                print_tree(&designer, out)?;
            }
            Command::Presets => {
                for preset in &settings.layout.presets {
                    writeln!(out, "{} ({}x{})", preset.name, preset.width, preset.height)?;
                }
            }
            Command::InitSettings { path } => {
                let path = match path {
                    Some(path) => path.clone(),
                    None => DesignerSettings::default_path()?,
                };
                settings.save_to_file(&path)?;
                writeln!(out, "Wrote settings to {}", path.display())?;
            }
        }
        Ok(())
    }

    fn load_settings(&self) -> anyhow::Result<DesignerSettings> {
        match &self.settings {
            Some(path) => DesignerSettings::load_from_file(path)
                .with_context(|| format!("Failed to load settings from {}", path.display())),
            None => Ok(DesignerSettings::load_or_default()),
        }
    }
}

/// Picks a preset by name, case-insensitively. Unknown names cancel.
#[derive(Debug, Clone, Default)]
pub struct NamedPresetPrompt {
    name: Option<String>,
}

impl NamedPresetPrompt {
    pub fn new(name: Option<String>) -> Self {
        Self { name }
    }
}

impl LayoutPrompt for NamedPresetPrompt {
    fn choose_layout(&mut self, presets: &[LayoutPreset]) -> Option<LayoutPreset> {
        let Some(name) = &self.name else {
            return presets.first().cloned();
        };
        let chosen = presets
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .cloned();
        if chosen.is_none() {
            tracing::warn!("No layout preset named '{}'", name);
        }
        chosen
    }
}

fn build_sample(
    designer: &mut LabelDesigner,
    text: Option<&str>,
    image: Option<&Path>,
) -> anyhow::Result<()> {
    let node = designer.add_text()?;
    if let Some(text) = text {
        designer
            .view_model_mut(node)
            .context("text element vanished")?
            .set_text(text)?;
    }
    designer.add_qr_code()?;
    designer.add_barcode(Symbology::Ean13)?;
    if let Some(image) = image {
        designer.add_image_from_path(image)?;
    }
    designer.clear_selection();
    Ok(())
}

fn print_tree(designer: &LabelDesigner, out: &mut impl Write) -> anyhow::Result<()> {
    writeln!(out, "{}", designer.display_name())?;
    if !designer.metadata.template_name.is_empty() {
        writeln!(out, "Template: {}", designer.metadata.template_name)?;
    }
    for group in designer.groups().iter().filter(|g| !g.items.is_empty()) {
        writeln!(out, "{} ({})", group.name, group.items.len())?;
        for vm in group.items.iter().filter_map(|n| designer.view_model(*n)) {
            let bounds = vm.bounds();
            writeln!(
                out,
                "  {} at ({}, {}) {}x{}",
                vm.display_name(),
                bounds.left,
                bounds.top,
                bounds.width,
                bounds.height
            )?;
        }
    }
    Ok(())
}
