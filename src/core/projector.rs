use crate::{
    constants::EMPTY_INFO,
    core::{record::VcfRecord, schema::Schema},
    error::TidyVcfError,
    utils::util::Result,
};
use std::collections::HashMap;

/// INFO values in schema order, `NA` where the record does not carry a key.
///
/// A flag entry without `=` counts as present with an empty value. Keys the header never
/// declared are dropped, and for a key repeated within one record the first value wins.
pub fn project_info<'a>(record: &VcfRecord<'a>, schema: &'a Schema) -> Vec<&'a str> {
    let info: &'a str = record.info;
    if info == EMPTY_INFO {
        return schema.info.values().copied().collect();
    }

    let lookup = decode_info(info);
    schema
        .info
        .iter()
        .map(|(key, placeholder)| lookup.get(key.as_str()).copied().unwrap_or(*placeholder))
        .collect()
}

/// FORMAT values for every sample, each re-ordered onto the schema's FORMAT keys.
///
/// The record's own key order is only used to pair keys with values; the output order always
/// comes from the schema so that rows stay rectangular across records.
pub fn project_format<'a>(record: &VcfRecord<'a>, schema: &'a Schema) -> Result<Vec<Vec<&'a str>>> {
    ensure_sample_count(record, schema)?;

    let format: &'a str = record.format;
    let keys: Vec<&'a str> = format.split(':').collect();
    record
        .genotypes
        .iter()
        .map(|&genotype| {
            let values: Vec<&str> = genotype.split(':').collect();
            if values.len() > keys.len() {
                return Err(TidyVcfError::malformed(
                    record.line_number,
                    format!(
                        "sample value '{}' has {} fields but FORMAT '{}' declares {}",
                        genotype,
                        values.len(),
                        format,
                        keys.len()
                    ),
                ));
            }
            // Trailing FORMAT fields may be dropped per sample; zip leaves them absent.
            let lookup: HashMap<&'a str, &'a str> = keys.iter().copied().zip(values).collect();
            Ok(schema
                .format
                .iter()
                .map(|(key, placeholder)| lookup.get(key.as_str()).copied().unwrap_or(*placeholder))
                .collect())
        })
        .collect()
}

/// Fails unless the record has one genotype column per header sample.
pub fn ensure_sample_count(record: &VcfRecord, schema: &Schema) -> Result<()> {
    if record.genotypes.len() != schema.n_samples() {
        return Err(TidyVcfError::SampleCountMismatch {
            line: record.line_number,
            expected: schema.n_samples(),
            found: record.genotypes.len(),
        });
    }
    Ok(())
}

/// Site table row: the content columns followed by the projected INFO values.
pub fn render_site_row(record: &VcfRecord, schema: &Schema) -> String {
    let mut row = record.content_string();
    for value in project_info(record, schema) {
        row.push('\t');
        row.push_str(value);
    }
    row
}

/// Genotype table rows, one per sample in schema order.
pub fn render_genotype_rows(record: &VcfRecord, schema: &Schema) -> Result<Vec<String>> {
    let content = record.content_string();
    let per_sample = project_format(record, schema)?;
    Ok(schema
        .samples
        .iter()
        .zip(per_sample)
        .map(|(sample, values)| {
            let mut row = format!("{content}\t{sample}");
            for value in values {
                row.push('\t');
                row.push_str(value);
            }
            row
        })
        .collect())
}

fn decode_info(info: &str) -> HashMap<&str, &str> {
    let mut lookup = HashMap::new();
    for entry in info.split(';').filter(|entry| !entry.is_empty()) {
        let (key, value) = entry.split_once('=').unwrap_or((entry, ""));
        lookup.entry(key).or_insert(value);
    }
    lookup
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{constants::MISSING_VALUE, core::schema::SchemaBuilder};

    const INFO_KEYS: [&str; 17] = [
        "AC",
        "AF",
        "AN",
        "BaseQRankSum",
        "DP",
        "END",
        "ExcessHet",
        "FS",
        "InbreedingCoeff",
        "MLEAC",
        "MLEAF",
        "MQ",
        "MQRankSum",
        "QD",
        "RAW_MQandDP",
        "ReadPosRankSum",
        "SOR",
    ];
    const FORMAT_KEYS: [&str; 11] = [
        "AD", "DP", "GQ", "GT", "MIN_DP", "PGT", "PID", "PL", "PS", "RGQ", "SB",
    ];

    fn schema_with(info: &[&str], format: &[&str], samples: &[&str]) -> Schema {
        let mut builder = SchemaBuilder::new();
        for key in format {
            builder.observe(&format!(
                "##FORMAT=<ID={key},Number=1,Type=String,Description=\"\">"
            ));
        }
        for key in info {
            builder.observe(&format!(
                "##INFO=<ID={key},Number=1,Type=String,Description=\"\">"
            ));
        }
        builder.observe(&format!(
            "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\t{}",
            samples.join("\t")
        ));
        builder.build()
    }

    fn record_line(info: &str, format: &str, genotypes: &[&str]) -> String {
        let mut line = format!("1\t89211\t.\tG\t.\t19.64\tQUAL_filter\t{info}\t{format}");
        for genotype in genotypes {
            line.push('\t');
            line.push_str(genotype);
        }
        line
    }

    #[test]
    fn test_project_info_missing_info() {
        let schema = schema_with(&INFO_KEYS, &FORMAT_KEYS, &["S1"]);
        let line = record_line(".", "GT", &["0/0"]);
        let record = VcfRecord::parse(&line, 1).unwrap();
        let values = project_info(&record, &schema);
        assert_eq!(values.len(), INFO_KEYS.len());
        assert!(values.iter().all(|v| *v == MISSING_VALUE));
    }

    #[test]
    fn test_project_info_in_schema_order() {
        let schema = schema_with(&INFO_KEYS, &FORMAT_KEYS, &["S1"]);
        let line = record_line("BaseQRankSum=-1.383;DP=65", "GT", &["0/0"]);
        let record = VcfRecord::parse(&line, 1).unwrap();
        let values = project_info(&record, &schema);
        assert_eq!(&values[..6], &["NA", "NA", "NA", "-1.383", "65", "NA"]);
        assert!(values[6..].iter().all(|v| *v == "NA"));
    }

    #[test]
    fn test_project_info_flags_and_undeclared_keys() {
        let schema = schema_with(&["DB", "DP", "H2"], &["GT"], &["S1"]);
        let line = record_line("NOVEL=1;DB;DP=10;;DP=99", "GT", &["0/0"]);
        let record = VcfRecord::parse(&line, 1).unwrap();
        assert_eq!(project_info(&record, &schema), vec!["", "10", "NA"]);
    }

    #[test]
    fn test_project_info_keeps_text_after_first_equals() {
        let schema = schema_with(&["ANN"], &["GT"], &["S1"]);
        let line = record_line("ANN=a=b|c", "GT", &["0/0"]);
        let record = VcfRecord::parse(&line, 1).unwrap();
        assert_eq!(project_info(&record, &schema), vec!["a=b|c"]);
    }

    #[test]
    fn test_project_format_rectangular_across_key_orders() {
        let schema = schema_with(&[], &FORMAT_KEYS, &["S1", "S2"]);
        let first = record_line(".", "GT:DP:RGQ", &["0/0:2:6", "0/1:5:15"]);
        let second = record_line(".", "RGQ:GT:DP", &["6:0/0:2", "15:0/1:5"]);
        let first = VcfRecord::parse(&first, 1).unwrap();
        let second = VcfRecord::parse(&second, 2).unwrap();

        let first = project_format(&first, &schema).unwrap();
        let second = project_format(&second, &schema).unwrap();
        assert_eq!(first.len(), schema.n_samples());
        assert!(first.iter().all(|row| row.len() == FORMAT_KEYS.len()));
        assert_eq!(first, second);
        assert_eq!(
            first[0],
            vec!["NA", "2", "NA", "0/0", "NA", "NA", "NA", "NA", "NA", "6", "NA"]
        );
    }

    #[test]
    fn test_project_format_dropped_trailing_fields() {
        let schema = schema_with(&[], &["GT", "DP", "GQ"], &["S1", "S2"]);
        let line = record_line(".", "GT:DP:GQ", &["0/1:4:30", "./."]);
        let record = VcfRecord::parse(&line, 1).unwrap();
        let rows = project_format(&record, &schema).unwrap();
        assert_eq!(rows[1], vec!["./.", "NA", "NA"]);
    }

    #[test]
    fn test_project_format_too_many_values() {
        let schema = schema_with(&[], &["GT"], &["S1"]);
        let line = record_line(".", "GT", &["0/1:4"]);
        let record = VcfRecord::parse(&line, 9).unwrap();
        let err = project_format(&record, &schema).unwrap_err();
        assert!(matches!(err, TidyVcfError::MalformedRecord { line: 9, .. }));
    }

    #[test]
    fn test_project_format_sample_count_mismatch() {
        let schema = schema_with(&[], &["GT"], &["S1", "S2"]);
        let line = record_line(".", "GT", &["0/1"]);
        let record = VcfRecord::parse(&line, 31).unwrap();
        let err = project_format(&record, &schema).unwrap_err();
        assert!(matches!(
            err,
            TidyVcfError::SampleCountMismatch {
                line: 31,
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn test_render_rows() {
        let schema = schema_with(&["DP"], &["GT", "DP"], &["S1", "S2"]);
        let line = record_line("DP=7", "GT", &["0/1", "1/1"]);
        let record = VcfRecord::parse(&line, 1).unwrap();
        assert_eq!(
            render_site_row(&record, &schema),
            "1\t89211\t.\tG\t.\t19.64\tQUAL_filter\t7"
        );
        assert_eq!(
            render_genotype_rows(&record, &schema).unwrap(),
            vec![
                "1\t89211\t.\tG\t.\t19.64\tQUAL_filter\tS1\t0/1\tNA",
                "1\t89211\t.\tG\t.\t19.64\tQUAL_filter\tS2\t1/1\tNA",
            ]
        );
    }
}
