use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{anyhow, ensure, Context};
use gb_io::reader::SeqReader;
use gb_io::seq::{Feature, Location, Reference, Seq, Topology};
use log::debug;
use seqblocks::data_structs::Strand;
use seqblocks::exports::indexmap::IndexMap;
use seqblocks::exports::serde_json::{self, Value};
use seqblocks::record::{FeatureRecord, SequenceRecord};

/// Reads every record of a GenBank file.
pub(crate) fn read_genbank(path: &Path) -> anyhow::Result<Vec<SequenceRecord>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    let records = parse_genbank(BufReader::new(file))
        .with_context(|| format!("Failed to read GenBank file {}", path.display()))?;
    debug!("Read {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Reads a JSON array of sequence records.
pub(crate) fn read_json(path: &Path) -> anyhow::Result<Vec<SequenceRecord>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse records from {}", path.display()))
}

pub(crate) fn parse_genbank<R: Read>(reader: R) -> anyhow::Result<Vec<SequenceRecord>> {
    SeqReader::new(reader)
        .enumerate()
        .map(|(idx, seq)| {
            let seq = seq.map_err(|e| anyhow!("Malformed record #{}: {:?}", idx, e))?;
            record_from_seq(seq)
        })
        .collect()
}

fn record_from_seq(seq: Seq) -> anyhow::Result<SequenceRecord> {
    let sequence = String::from_utf8(seq.seq.to_ascii_uppercase())
        .context("Sequence is not valid UTF-8")?;

    let features = seq
        .features
        .iter()
        .map(feature_record)
        .collect::<anyhow::Result<Vec<_>>>()
        .with_context(|| {
            format!(
                "Invalid feature in record {}",
                seq.name.as_deref().unwrap_or("<unnamed>")
            )
        })?;

    Ok(SequenceRecord::new(sequence)
        .with_id(seq.version.clone().or_else(|| seq.accession.clone()))
        .with_name(seq.name.clone())
        .with_description(seq.definition.clone())
        .with_features(features)
        .with_annotations(record_annotations(&seq)))
}

/// Record-level header data: molecule, topology, division, date, keywords,
/// source, comments and references.
fn record_annotations(seq: &Seq) -> IndexMap<String, Value> {
    let mut annotations = IndexMap::new();
    let mut insert = |key: &str, value: Option<Value>| {
        if let Some(value) = value {
            annotations.insert(key.to_string(), value);
        }
    };

    insert(
        "molecule_type",
        seq.molecule_type.as_deref().map(Value::from),
    );
    insert(
        "topology",
        Some(Value::from(match seq.topology {
            Topology::Circular => "circular",
            Topology::Linear => "linear",
        })),
    );
    insert(
        "data_file_division",
        Some(seq.division.as_str())
            .filter(|division| !division.is_empty())
            .map(Value::from),
    );
    insert("date", seq.date.as_ref().map(|date| Value::from(date.to_string())));
    insert("accessions", seq.accession.as_deref().map(Value::from));
    insert("sequence_version", seq.version.as_deref().map(Value::from));
    insert("keywords", seq.keywords.as_deref().map(Value::from));
    insert("dblink", seq.dblink.as_deref().map(Value::from));
    if let Some(source) = seq.source.as_ref() {
        insert("source", Some(Value::from(source.source.as_str())));
        insert("organism", source.organism.as_deref().map(Value::from));
    }
    if !seq.comments.is_empty() {
        insert("comment", Some(Value::from(seq.comments.join("\n"))));
    }
    if !seq.references.is_empty() {
        insert(
            "references",
            Some(Value::Array(
                seq.references.iter().map(reference_value).collect(),
            )),
        );
    }
    annotations
}

fn reference_value(reference: &Reference) -> Value {
    let mut fields = serde_json::Map::new();
    let mut insert = |key: &str, value: Option<&str>| {
        if let Some(value) = value.filter(|value| !value.is_empty()) {
            fields.insert(key.to_string(), Value::from(value));
        }
    };
    insert("location", Some(reference.description.as_str()));
    insert("authors", reference.authors.as_deref());
    insert("consrtm", reference.consortium.as_deref());
    insert("title", Some(reference.title.as_str()));
    insert("journal", reference.journal.as_deref());
    insert("pubmed_id", reference.pubmed.as_deref());
    insert("comment", reference.remark.as_deref());
    Value::Object(fields)
}

/// Complement locations are reverse strand, anything else is forward.
fn feature_record(feature: &Feature) -> anyhow::Result<FeatureRecord> {
    let kind = feature.kind.to_string();
    let (start, end) = feature
        .location
        .find_bounds()
        .map_err(|e| anyhow!("Could not read range of {} feature: {:?}", kind, e))?;
    ensure!(
        start >= 0 && end >= 0,
        "{} feature has negative range bounds",
        kind
    );
    let strand = match feature.location {
        Location::Complement(_) => Strand::Reverse,
        _ => Strand::Forward,
    };

    Ok(feature
        .qualifiers
        .iter()
        .fold(
            FeatureRecord::new(start as usize, end as usize, strand, kind),
            |record, (key, value)| {
                record.with_qualifier(key.to_string(), value.clone().unwrap_or_default())
            },
        ))
}

#[cfg(test)]
mod tests {
    use seqblocks::convert::{convert_record, ConvertConfig};

    use super::*;

    const GENBANK: &str = "\
LOCUS       PTEST                     40 bp    DNA     circular SYN 01-JAN-2024
DEFINITION  Test construct.
ACCESSION   PTEST001
VERSION     PTEST001.1
KEYWORDS    .
SOURCE      synthetic construct
  ORGANISM  synthetic construct
            other sequences; artificial sequences.
REFERENCE   1  (bases 1 to 40)
  AUTHORS   Doe,J. and Roe,R.
  TITLE     Direct Submission
  JOURNAL   Submitted (01-JAN-2024) Test Lab, Test Street
  PUBMED    12345678
FEATURES             Location/Qualifiers
     source          1..40
                     /organism=\"synthetic construct\"
                     /mol_type=\"other DNA\"
     promoter        1..10
                     /label=\"pTest\"
     CDS             complement(15..30)
                     /gene=\"abc\"
                     /product=\"test protein\"
ORIGIN
        1 atgcatgcat gcatgcatgc atgcatgcat gcatgcatgc
//
";

    #[test]
    fn test_parse_genbank_record() {
        let records = parse_genbank(GENBANK.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.name.as_deref(), Some("PTEST"));
        assert_eq!(record.id.as_deref(), Some("PTEST001.1"));
        assert_eq!(record.sequence.len(), 40);
        assert!(record.sequence.starts_with("ATGCATGCAT"));
        assert_eq!(record.annotations["topology"], Value::from("circular"));
        assert_eq!(record.annotations["molecule_type"], Value::from("DNA"));
        assert_eq!(
            record.annotations["organism"],
            Value::from("synthetic construct")
        );

        let references = record.annotations["references"].as_array().unwrap();
        assert_eq!(references.len(), 1);
        assert_eq!(references[0]["authors"], Value::from("Doe,J. and Roe,R."));
        assert_eq!(references[0]["title"], Value::from("Direct Submission"));
        assert_eq!(references[0]["pubmed_id"], Value::from("12345678"));
        assert!(references[0]["journal"]
            .as_str()
            .unwrap()
            .starts_with("Submitted"));

        let promoter = &record.features[1];
        assert_eq!((promoter.start, promoter.end), (0, 10));
        assert_eq!(promoter.strand, Strand::Forward);
        assert_eq!(promoter.qualifier("label"), Some("pTest"));

        let cds = &record.features[2];
        assert_eq!(cds.kind, "CDS");
        assert_eq!((cds.start, cds.end), (14, 30));
        assert_eq!(cds.strand, Strand::Reverse);
        assert_eq!(cds.qualifier("product"), Some("test protein"));
    }

    #[test]
    fn test_references_reach_root_metadata() {
        let record = parse_genbank(GENBANK.as_bytes()).unwrap().remove(0);
        let store = convert_record(&record, &ConvertConfig::default()).unwrap();

        let metadata = store.root().record().as_ref().unwrap();
        assert_eq!(metadata.original_id.as_deref(), Some("PTEST001.1"));
        assert_eq!(
            metadata.annotations["references"][0]["authors"],
            Value::from("Doe,J. and Roe,R.")
        );
        assert_eq!(
            metadata.source_qualifiers.get("organism").map(String::as_str),
            Some("synthetic construct")
        );
    }
}
