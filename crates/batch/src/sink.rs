use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use fbds_core::{ExtractionResult, CSV_HEADER};

use crate::error::SinkError;

/// Header-first, append-only CSV writer over the fixed five-column schema.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
    rows: usize,
}

impl CsvSink<BufWriter<File>> {
    /// Create (or truncate) the output file, creating parent directories.
    pub fn create(path: &Path) -> Result<Self, SinkError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| SinkError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let file = File::create(path).map_err(|source| SinkError::Open {
            path: PathBuf::from(path),
            source,
        })?;
        Self::from_writer(BufWriter::new(file))
    }
}

impl<W: Write> CsvSink<W> {
    /// Wrap any writer and emit the header row.
    pub fn from_writer(inner: W) -> Result<Self, SinkError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(inner);
        writer.write_record(CSV_HEADER)?;
        Ok(Self { writer, rows: 0 })
    }

    pub fn write(&mut self, row: &ExtractionResult) -> Result<(), SinkError> {
        self.writer.serialize(row)?;
        self.rows += 1;
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flush everything and hand back the writer with the row count.
    pub fn finish(self) -> Result<(usize, W), SinkError> {
        let rows = self.rows;
        let inner = self
            .writer
            .into_inner()
            .map_err(|e| SinkError::Flush(e.into_error()))?;
        Ok((rows, inner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    /// Accepts nothing, like a volume with no space left.
    struct FullDisk;

    impl Write for FullDisk {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "no space left on device"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::Other, "no space left on device"))
        }
    }

    fn row(region: &str, city: &str, base: Option<&str>, text: &str) -> ExtractionResult {
        ExtractionResult {
            region: region.into(),
            sublevel: city.into(),
            primary_year: base.map(str::to_string),
            secondary_year: Some("2000".into()),
            raw_text: text.into(),
        }
    }

    fn render(rows: &[ExtractionResult]) -> String {
        let mut sink = CsvSink::from_writer(Vec::new()).unwrap();
        for r in rows {
            sink.write(r).unwrap();
        }
        let (n, buf) = sink.finish().unwrap();
        assert_eq!(n, rows.len());
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn header_only_when_empty() {
        assert_eq!(render(&[]), "ESTADO,CIDADE,ANO_BASE,ANO_SIRGAS,FULL\n");
    }

    #[test]
    fn rows_follow_header_in_write_order() {
        let out = render(&[
            row("SP", "Campinas", Some("2015"), "Ano Base: 2015 Datum SIRGAS 2000"),
            row("RJ", "Niteroi", None, ""),
        ]);
        assert_eq!(
            out,
            "ESTADO,CIDADE,ANO_BASE,ANO_SIRGAS,FULL\n\
             SP,Campinas,2015,2000,Ano Base: 2015 Datum SIRGAS 2000\n\
             RJ,Niteroi,,2000,\n"
        );
    }

    #[test]
    fn labels_with_commas_are_quoted() {
        let out = render(&[row("SP", "Embu, Guacu", None, "x")]);
        assert!(out.lines().nth(1).unwrap().starts_with("SP,\"Embu, Guacu\","), "{out}");
    }

    #[test]
    fn create_makes_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/nested/mapas.csv");
        let mut sink = CsvSink::create(&path).unwrap();
        sink.write(&row("SP", "Campinas", Some("2015"), "t")).unwrap();
        assert_eq!(sink.rows(), 1);
        sink.finish().unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn create_fails_when_parent_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"").unwrap();
        let err = CsvSink::create(&blocker.join("out.csv")).err().unwrap();
        assert!(matches!(err, SinkError::CreateDir { .. }));
    }

    #[test]
    fn finish_reports_flush_failure() {
        let mut sink = CsvSink::from_writer(FullDisk).unwrap();
        sink.write(&row("SP", "Campinas", Some("2015"), "t")).unwrap();
        let err = sink.finish().err().unwrap();
        assert!(matches!(err, SinkError::Flush(_)));
        assert!(err.to_string().contains("no space left"), "{err}");
    }

    #[test]
    fn row_larger_than_the_buffer_reports_write_failure() {
        let mut sink = CsvSink::from_writer(FullDisk).unwrap();
        let legend = "Ano Base 2015 ".repeat(4096);
        let err = sink.write(&row("SP", "Campinas", None, &legend)).unwrap_err();
        assert!(matches!(err, SinkError::Write(_)));
        assert_eq!(sink.rows(), 0);
    }
}
