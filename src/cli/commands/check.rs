//! `jintest <TEMPLATE>` - lint, render, and validate a template
//!
//! The stages run in order and stop at the first failure:
//! lint only without data, render only with data, and
//! lint → render → validate when an output type is requested.

use console::style;
use log::debug;
use miette::Result;
use std::path::{Path, PathBuf};

use crate::cli::GlobalOpts;
use crate::core::{load_data, Config, Template};
use crate::markup::MarkupKind;

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// Path to the Jinja template file to be linted, ex: codebase/path/somefile.txt.
    /// Checks for basic syntax errors. Any errors will be reported.
    #[arg(value_name = "TEMPLATE")]
    pub template: PathBuf,

    /// Render the template with the data in this JSON file. Useful for
    /// checking the template for data reference errors, which will be reported.
    #[arg(long, value_name = "PATH")]
    pub jsondata: Option<PathBuf>,

    /// Check that the HTML, XML, or JSON structure of the rendered output is
    /// valid for the document type. Requires --jsondata.
    #[arg(long, value_enum, ignore_case = true, requires = "jsondata")]
    pub validate: Option<MarkupKind>,
}

pub fn run(args: CheckArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    debug!("configuration: {:?}", config);
    let template = Template::with_config(&args.template, &config);

    match (args.jsondata.as_deref(), args.validate) {
        (Some(data), Some(kind)) => validate(&template, data, kind),
        (Some(data), None) => render(&template, data),
        (None, _) => lint(&template, global),
    }
}

fn lint(template: &Template, global: &GlobalOpts) -> Result<()> {
    if let Err(err) = template.lint() {
        if !global.quiet {
            println!("Found template syntax errors:");
        }
        return Err(err.into());
    }

    println!(
        "{} {}",
        style("LINT OK:").green(),
        template.path().display()
    );
    Ok(())
}

fn render(template: &Template, data_path: &Path) -> Result<()> {
    let data = load_data(data_path)?;
    let output = template.render(&data)?;
    println!("{}", output);
    Ok(())
}

fn validate(template: &Template, data_path: &Path, kind: MarkupKind) -> Result<()> {
    template.lint()?;
    debug!("lint passed, rendering with {}", data_path.display());

    let data = load_data(data_path)?;
    let output = template.render(&data)?;
    debug!("render passed, validating output as {}", kind);

    kind.validate(&output)?;
    println!("{}", style("Output structure is valid.").green());
    Ok(())
}
