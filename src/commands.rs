use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::cli::{Cli, ConflateArgs, ConformArgs};
use crate::common::fs::require_dir_exists;
use crate::conflate::{conflate_addresses, conflate_footprints, merge_footprints_and_addresses};
use crate::conflate::{project_crossref, project_entities, project_footprints};
use crate::io::parquet::{read_conformed_provider, write_crossref, write_entities, write_footprints};
use crate::types::Provider;

const ALL_PROVIDERS: [Provider; 5] = [
    Provider::OpenStreetMap,
    Provider::Microsoft,
    Provider::UsaStructures,
    Provider::Nad,
    Provider::OpenAddresses,
];

/// Ingest and schema-normalize source providers for the given counties.
///
/// Conform is an external collaborator per spec (per-provider ingestion and
/// schema normalization happen outside this crate); this command validates
/// its directories and is otherwise not yet wired up.
pub fn conform(cli: &Cli, args: &ConformArgs) -> Result<()> {
    require_dir_exists(&args.input_directory)?;

    for fips in &args.fips {
        crate::fips::validate_code(fips)?;
        let out_dir = args.output_directory.join(format!("conform/fips={fips}"));

        if false {
            // not yet implemented: per-provider ingestion lives outside this crate
            if cli.verbose > 0 {
                eprintln!("[conform] fips={fips} -> dir {}", out_dir.display());
            }
        }
    }

    Ok(())
}

/// Run the conflation core end to end for the given counties: read each
/// provider's conformed frame, conflate footprints and addresses, merge
/// them, and write the three output projections.
pub fn conflate(cli: &Cli, args: &ConflateArgs) -> Result<()> {
    require_dir_exists(&args.input_directory)?;

    for fips in &args.fips {
        crate::fips::validate_code(fips)?;

        if cli.verbose > 0 {
            eprintln!("[conflate] fips={fips}");
        }

        let mut frames = Vec::with_capacity(ALL_PROVIDERS.len());
        for provider in ALL_PROVIDERS {
            let path = provider_path(&args.input_directory, fips, provider);
            let features = if path.exists() {
                read_conformed_provider(&path, provider)
                    .with_context(|| format!("[conflate] fips={fips} provider={provider}"))?
            } else {
                Vec::new()
            };
            if cli.verbose > 1 {
                eprintln!("[conflate] fips={fips} provider={provider} rows={}", features.len());
            }
            frames.push(features);
        }
        let [openstreetmap, microsoft, usa_structures, nad, open_addresses] = {
            let mut iter = frames.into_iter();
            [
                iter.next().unwrap(),
                iter.next().unwrap(),
                iter.next().unwrap(),
                iter.next().unwrap(),
                iter.next().unwrap(),
            ]
        };

        let footprints = conflate_footprints(&openstreetmap, &microsoft, &usa_structures)
            .with_context(|| format!("[conflate] fips={fips} footprint conflation"))?;
        let addresses = conflate_addresses(&nad, &open_addresses)
            .with_context(|| format!("[conflate] fips={fips} address conflation"))?;

        if cli.verbose > 0 {
            eprintln!(
                "[conflate] fips={fips} footprints={} addresses={}",
                footprints.len(),
                addresses.len()
            );
        }

        let merged = merge_footprints_and_addresses(&footprints, &addresses)
            .with_context(|| format!("[conflate] fips={fips} footprint-address merge"))?;

        let entities = project_entities(&merged);
        let crossref = project_crossref(&merged);
        let footprint_records = project_footprints(&footprints);

        write_entities(&entities, &output_path(&args.output_directory, "entities", fips))
            .with_context(|| format!("[conflate] fips={fips} writing entities"))?;
        write_crossref(&crossref, &output_path(&args.output_directory, "crossref", fips))
            .with_context(|| format!("[conflate] fips={fips} writing crossref"))?;
        write_footprints(&footprint_records, &output_path(&args.output_directory, "footprints", fips))
            .with_context(|| format!("[conflate] fips={fips} writing footprints"))?;

        if cli.verbose > 0 {
            eprintln!("[conflate] fips={fips} entities={}", entities.len());
        }
    }

    Ok(())
}

fn provider_path(input_directory: &Path, fips: &str, provider: Provider) -> PathBuf {
    input_directory.join(format!("conform/fips={fips}/provider={provider}/data.parquet"))
}

fn output_path(output_directory: &Path, dataset: &str, fips: &str) -> PathBuf {
    output_directory.join(format!("conflate/{dataset}/fips={fips}/data.parquet"))
}
