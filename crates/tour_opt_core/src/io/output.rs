use std::{
    ffi::OsString,
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::{Error, Result, TourResult, constants::TOUR_FILE_EXTENSION};

/// `<input>.tour`, built as a new path next to the input file.
pub fn tour_output_path(input: &Path) -> PathBuf {
    let mut name = OsString::from(input.as_os_str());
    name.push(TOUR_FILE_EXTENSION);
    PathBuf::from(name)
}

/// Final length on the first line, then one city index per line.
pub fn write_tour<W: Write>(result: &TourResult, writer: W) -> Result<()> {
    let mut out = BufWriter::new(writer);
    writeln!(out, "{}", result.final_length)?;
    for idx in result.tour.as_slice() {
        writeln!(out, "{idx}")?;
    }
    out.flush()?;
    Ok(())
}

/// Writes to `path`, or to stdout when `path` is `None`.
pub fn write_tour_to(result: &TourResult, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                Error::other(format!(
                    "failed to create output file {}: {e}",
                    path.display()
                ))
            })?;
            write_tour(result, file)?;
            log::info!("output: wrote path={}", path.display());
            Ok(())
        }
        None => write_tour(result, std::io::stdout().lock()),
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{tour_output_path, write_tour, write_tour_to};
    use crate::{OptimizeStats, Tour, TourResult};

    fn result() -> TourResult {
        TourResult::new(48, 40, Tour::new(vec![0, 2, 1, 3]), OptimizeStats::default())
    }

    #[test]
    fn tour_output_path_appends_extension_without_touching_input() {
        let input = Path::new("data/cities.txt");
        let output = tour_output_path(input);

        assert_eq!(output, Path::new("data/cities.txt.tour"));
        assert_eq!(input, Path::new("data/cities.txt"));
    }

    #[test]
    fn write_tour_emits_length_then_indices() {
        let mut buf = Vec::new();
        write_tour(&result(), &mut buf).expect("write tour");
        assert_eq!(String::from_utf8(buf).expect("utf8"), "40\n0\n2\n1\n3\n");
    }

    #[test]
    fn write_tour_for_empty_tour_is_just_the_length() {
        let empty = TourResult::new(0, 0, Tour::default(), OptimizeStats::default());
        let mut buf = Vec::new();
        write_tour(&empty, &mut buf).expect("write tour");
        assert_eq!(String::from_utf8(buf).expect("utf8"), "0\n");
    }

    #[test]
    fn write_tour_to_creates_file() {
        let path = std::env::temp_dir().join(format!("tour-opt-{}.tour", std::process::id()));
        write_tour_to(&result(), Some(&path)).expect("write file");

        let text = std::fs::read_to_string(&path).expect("read back");
        std::fs::remove_file(&path).expect("cleanup");
        assert!(text.starts_with("40\n0\n"));
    }
}
