use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, ValueEnum};
use log::info;
use seqblocks::convert::{convert_records, ConvertConfig};
use seqblocks::exports::serde_json;
use seqblocks::hierarchy::DEFAULT_FILLER_PREFIX_LEN;

use crate::genbank::{read_genbank, read_json};
use crate::utils::{expand_wildcards, init_progress, UtilsArgs};

#[derive(Debug, Clone, Copy, ValueEnum, Eq, PartialEq)]
pub(crate) enum InputFormat {
    Genbank,
    Json,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct ConvertArgs {
    #[arg(
        value_parser,
        num_args = 1..,
        required = true,
        help = "Paths to input files. Wildcards are expanded."
    )]
    inputs: Vec<String>,
    #[arg(
        short,
        long,
        help = "Path to the output project file. Written to stdout if omitted."
    )]
    output: Option<PathBuf>,
    #[arg(
        short,
        long,
        value_enum,
        default_value_t = InputFormat::Genbank,
        help = "Format of the input files."
    )]
    format: InputFormat,
    #[arg(
        long,
        default_value_t = false,
        help = "Skip records that fail to convert instead of aborting."
    )]
    skip_failed: bool,
    #[arg(
        long,
        default_value_t = DEFAULT_FILLER_PREFIX_LEN,
        help = "Number of sequence characters in filler block names."
    )]
    filler_prefix: usize,
    #[arg(long, default_value_t = false, help = "Pretty-print the output JSON.")]
    pretty: bool,
}

impl ConvertArgs {
    pub fn run(
        &self,
        utils: &UtilsArgs,
    ) -> anyhow::Result<()> {
        let paths = expand_wildcards(&self.inputs)?;
        info!("Reading {} {:?} files", paths.len(), self.format);

        let progress_bar = init_progress(paths.len(), utils.progress)?;
        let mut records = Vec::new();
        for path in paths.iter() {
            let file_records = match self.format {
                InputFormat::Genbank => read_genbank(path)?,
                InputFormat::Json => read_json(path)?,
            };
            records.extend(file_records);
            progress_bar.inc(1);
        }
        progress_bar.finish_and_clear();

        let config = ConvertConfig::default()
            .with_skip_failed_records(self.skip_failed)
            .with_filler_prefix_len(self.filler_prefix)
            .with_parallel(utils.parallel());
        let bundle = convert_records(&records, &config)?;

        let sink: Box<dyn Write> = match self.output.as_ref() {
            Some(path) => Box::new(
                File::create(path)
                    .with_context(|| format!("Failed to create {}", path.display()))?,
            ),
            None => Box::new(std::io::stdout().lock()),
        };
        let mut writer = BufWriter::new(sink);
        if self.pretty {
            serde_json::to_writer_pretty(&mut writer, &bundle)?;
        }
        else {
            serde_json::to_writer(&mut writer, &bundle)?;
        }
        writeln!(writer)?;
        writer.flush()?;

        if let Some(path) = self.output.as_ref() {
            info!(
                "Wrote {} blocks of {} records to {}",
                bundle.blocks.len(),
                bundle.project.components.len(),
                path.display()
            );
        }
        Ok(())
    }
}
