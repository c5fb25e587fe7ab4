use crate::{error::TidyVcfError, io::readers::is_gzipped, utils::util::Result};
use flate2::{write::GzEncoder, Compression};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

enum Sink {
    Plain(BufWriter<File>),
    Gzip(GzEncoder<BufWriter<File>>),
}

impl Sink {
    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Sink::Plain(writer) => writer,
            Sink::Gzip(encoder) => encoder,
        }
    }
}

/// Line-oriented tab-delimited output file, gzip-compressed when the path ends in `.gz`.
pub struct TableWriter {
    path: PathBuf,
    sink: Sink,
}

impl TableWriter {
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|source| TidyVcfError::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;
        let writer = BufWriter::new(file);
        let sink = if is_gzipped(path) {
            Sink::Gzip(GzEncoder::new(writer, Compression::default()))
        } else {
            Sink::Plain(writer)
        };
        log::trace!("Opened table output {}", path.display());
        Ok(Self {
            path: path.to_path_buf(),
            sink,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.sink.writer(), "{line}").map_err(|error| {
            crate::tidy_error!("Failed to write to {}: {error}", self.path.display())
        })
    }

    /// Flushes buffered output and, for gzip output, writes the stream trailer.
    pub fn finish(self) -> Result<()> {
        let path = self.path;
        let mut writer = match self.sink {
            Sink::Plain(writer) => writer,
            Sink::Gzip(encoder) => encoder.finish().map_err(|error| {
                crate::tidy_error!("Failed to finish gzip stream {}: {error}", path.display())
            })?,
        };
        writer
            .flush()
            .map_err(|error| crate::tidy_error!("Failed to flush {}: {error}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::MultiGzDecoder;
    use std::io::Read;
    use tempfile::tempdir;

    #[test]
    fn test_table_writer_plain() {
        let temp_dir = tempdir().expect("temp dir should be created");
        let path = temp_dir.path().join("sites.tsv");
        let mut writer = TableWriter::create(&path).unwrap();
        writer.write_line("CHROM\tPOS").unwrap();
        writer.write_line("1\t5").unwrap();
        writer.write_line("1\t9").unwrap();
        writer.finish().unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "CHROM\tPOS\n1\t5\n1\t9\n"
        );
    }

    #[test]
    fn test_table_writer_gzip() {
        let temp_dir = tempdir().expect("temp dir should be created");
        let path = temp_dir.path().join("genotypes.tsv.gz");
        let mut writer = TableWriter::create(&path).unwrap();
        writer.write_line("CHROM\tPOS\tIND").unwrap();
        writer.write_line("1\t5\tS1").unwrap();
        writer.finish().unwrap();

        let mut contents = String::new();
        MultiGzDecoder::new(File::open(&path).unwrap())
            .read_to_string(&mut contents)
            .unwrap();
        assert_eq!(contents, "CHROM\tPOS\tIND\n1\t5\tS1\n");
    }

    #[test]
    fn test_table_writer_missing_directory() {
        let temp_dir = tempdir().expect("temp dir should be created");
        let path = temp_dir.path().join("absent").join("sites.tsv");
        assert!(matches!(
            TableWriter::create(&path),
            Err(TidyVcfError::FileAccess { .. })
        ));
    }
}
