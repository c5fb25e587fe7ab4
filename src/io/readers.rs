use crate::{error::TidyVcfError, utils::util::Result};
use flate2::read::MultiGzDecoder;
use std::{
    fs::File,
    io::{BufReader, Read as ioRead},
    path::Path,
};

pub fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".gzip")
}

/// Opens a plain or gzip/bgzip text file, choosing by file name suffix.
pub fn open_text_reader(path: &Path) -> Result<BufReader<Box<dyn ioRead>>> {
    let file = File::open(path).map_err(|source| TidyVcfError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;
    if is_gzipped(path) {
        let gz_decoder = MultiGzDecoder::new(file);
        if gz_decoder.header().is_some() {
            Ok(BufReader::new(Box::new(gz_decoder)))
        } else {
            Err(TidyVcfError::InvalidGzipHeader {
                path: path.to_path_buf(),
            })
        }
    } else {
        Ok(BufReader::new(Box::new(file)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::{write::GzEncoder, Compression};
    use std::io::{BufRead, Write};
    use tempfile::tempdir;

    #[test]
    fn test_is_gzipped() {
        assert!(is_gzipped(Path::new("calls.vcf.gz")));
        assert!(is_gzipped(Path::new("CALLS.VCF.GZ")));
        assert!(is_gzipped(Path::new("calls.vcf.gzip")));
        assert!(!is_gzipped(Path::new("calls.vcf")));
    }

    #[test]
    fn test_open_text_reader_plain_and_gzip() {
        let temp_dir = tempdir().expect("temp dir should be created");

        let plain_path = temp_dir.path().join("calls.vcf");
        std::fs::write(&plain_path, "##fileformat=VCFv4.2\n").unwrap();
        let mut line = String::new();
        open_text_reader(&plain_path)
            .unwrap()
            .read_line(&mut line)
            .unwrap();
        assert_eq!(line, "##fileformat=VCFv4.2\n");

        let gz_path = temp_dir.path().join("calls.vcf.gz");
        let mut encoder = GzEncoder::new(File::create(&gz_path).unwrap(), Compression::default());
        encoder.write_all(b"##fileformat=VCFv4.2\n").unwrap();
        encoder.finish().unwrap();
        let mut line = String::new();
        open_text_reader(&gz_path)
            .unwrap()
            .read_line(&mut line)
            .unwrap();
        assert_eq!(line, "##fileformat=VCFv4.2\n");
    }

    #[test]
    fn test_open_text_reader_missing_file() {
        let temp_dir = tempdir().expect("temp dir should be created");
        let Err(err) = open_text_reader(&temp_dir.path().join("absent.vcf")) else {
            panic!("opening a missing file should fail");
        };
        assert!(matches!(err, TidyVcfError::FileAccess { .. }));
    }

    #[test]
    fn test_open_text_reader_rejects_plain_text_named_gz() {
        let temp_dir = tempdir().expect("temp dir should be created");
        let path = temp_dir.path().join("calls.vcf.gz");
        std::fs::write(&path, "##fileformat=VCFv4.2\n").unwrap();
        let Err(err) = open_text_reader(&path) else {
            panic!("plain text named .gz should be rejected");
        };
        assert!(matches!(err, TidyVcfError::InvalidGzipHeader { .. }));
    }
}
