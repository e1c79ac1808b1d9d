//! End-to-end reader tests against a fake `pandoc` script.
//!
//! The script records each invocation in `calls.log`, wraps stdin in `<p>`,
//! answers standalone (TOC) runs with a fixed `<nav>`, and fails on `--fail`.

#![cfg(unix)]

use pandoc_reader::{
    MetaValue, PandocReader, Reader, ReaderConfig, ReaderError, ReaderRegistry,
    config::{Extensions, WordsPerMinute},
    register,
};
use std::{
    fs,
    os::unix::fs::PermissionsExt,
    path::{Path, PathBuf},
    sync::Arc,
};
use tempfile::TempDir;

struct Fixture {
    dir: TempDir,
    config: ReaderConfig,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let script = dir.path().join("fake-pandoc");
        let log = dir.path().join("calls.log");
        fs::write(
            &script,
            format!(
                r#"#!/bin/sh
printf '%s\n' "$*" >> "{log}"
for arg in "$@"; do
  if [ "$arg" = "--fail" ]; then cat >/dev/null; echo "boom" >&2; exit 7; fi
  if [ "$arg" = "--standalone" ]; then cat >/dev/null; printf '<nav>toc</nav>'; exit 0; fi
done
printf '<p>'
cat
printf '</p>'
"#,
                log = log.display()
            ),
        )
        .unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

        let mut config = ReaderConfig::default();
        config.pandoc.bin = script.display().to_string();
        Self { dir, config }
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn reader(&self) -> PandocReader {
        PandocReader::new(Arc::new(self.config.clone()))
    }

    fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.dir.path().join("calls.log"))
            .map(|log| log.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }
}

#[test]
fn converts_body_and_keeps_metadata() {
    let fx = Fixture::new();
    let path = fx.write("post.md", "---\nTitle: \"Sample\"\ndate: 2024-01-01\n---\nBody text");

    let doc = fx.reader().read(&path).unwrap();

    assert_eq!(doc.html, "<p>Body text</p>");
    assert_eq!(doc.metadata.text("title"), Some("Sample"));
    assert_eq!(doc.metadata.text("date"), Some("2024-01-01"));
    assert!(!doc.metadata.contains_key("toc"));
    assert!(!doc.metadata.contains_key("reading_time"));
    assert_eq!(fx.calls(), vec!["--from markdown --to html5"]);
}

#[test]
fn extensions_and_args_reach_the_converter() {
    let mut fx = Fixture::new();
    fx.config.pandoc.args = vec!["--mathjax".into()];
    fx.config.pandoc.extensions = Extensions::Joined("+smart".into());
    let path = fx.write("post.md", "---\n---\nx");

    fx.reader().read(&path).unwrap();
    assert_eq!(fx.calls(), vec!["--from markdown+smart --to html5 --mathjax"]);
}

#[test]
fn placeholders_are_restored() {
    let fx = Fixture::new();
    let path = fx.write("post.md", "---\n---\n[a](%7Bfilename%7D/b.md) %7Bstatic%7D/img.png");

    let doc = fx.reader().read(&path).unwrap();
    assert_eq!(doc.html, "<p>[a]({filename}/b.md) {static}/img.png</p>");
}

#[test]
fn toc_runs_converter_twice() {
    let mut fx = Fixture::new();
    fx.config.pandoc.args = vec!["--toc".into()];
    let path = fx.write("post.md", "---\ntitle: T\n---\n# Heading\n");

    let doc = fx.reader().read(&path).unwrap();

    assert_eq!(doc.metadata.get("toc"), Some(&MetaValue::from("<nav>toc</nav>")));
    let calls = fx.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls[1].starts_with("--from markdown --to html5 --toc --standalone --template "));
    assert!(calls[1].contains("toc-template."));
}

#[test]
fn toc_template_override() {
    let mut fx = Fixture::new();
    let template = fx.write("my-toc.html", "$table-of-contents$");
    fx.config.pandoc.args = vec!["--table-of-contents".into()];
    fx.config.pandoc.toc_template = Some(template.clone());
    let path = fx.write("post.md", "---\n---\n# H\n");

    fx.reader().read(&path).unwrap();
    assert!(fx.calls()[1].ends_with(&format!("--template {}", template.display())));
}

#[test]
fn reading_time_rounds_up() {
    let mut fx = Fixture::new();
    fx.config.reading_time.enable = true;
    fx.config.reading_time.words_per_minute = WordsPerMinute::Number(100.0);
    let body = vec!["word"; 400].join(" ");
    let path = fx.write("post.md", &format!("---\ntitle: Long\n---\n{body}\n"));

    let doc = fx.reader().read(&path).unwrap();
    assert_eq!(doc.metadata.get("reading_time"), Some(&MetaValue::Integer(4)));

    let path = fx.write("longer.md", &format!("---\n---\n{body} one more\n"));
    let doc = fx.reader().read(&path).unwrap();
    assert_eq!(doc.metadata.get("reading_time"), Some(&MetaValue::Integer(5)));
}

#[test]
fn non_numeric_reading_rate_fails() {
    let mut fx = Fixture::new();
    fx.config.reading_time.enable = true;
    fx.config.reading_time.words_per_minute = WordsPerMinute::Text("fast".into());
    let path = fx.write("post.md", "---\n---\nwords");

    let err = fx.reader().read(&path).unwrap_err();
    assert!(matches!(err, ReaderError::Config(_)));
    assert_eq!(err.to_string(), "reading_time.words_per_minute must be a number.");
}

#[test]
fn formatted_fields_are_rendered() {
    let mut fx = Fixture::new();
    fx.config.pandoc.formatted_fields = vec!["summary".into()];
    let path = fx.write("post.md", "---\nSummary: see %7Battach%7D/f.pdf\ntitle: Plain\n---\nBody");

    let doc = fx.reader().read(&path).unwrap();
    assert_eq!(doc.metadata.text("summary"), Some("<p>see {attach}/f.pdf</p>"));
    assert_eq!(doc.metadata.text("title"), Some("Plain"));
    assert_eq!(fx.calls().len(), 2);
}

#[test]
fn custom_hook_sees_every_value() {
    let mut fx = Fixture::new();
    fx.config.pandoc.args = vec!["--toc".into()];
    let path = fx.write("post.md", "---\ntitle: hello\ntags: a, b\n---\nBody");

    let reader = fx.reader().with_hook(|key: &str, value: String| {
        if key == "tags" {
            return Err(ReaderError::hook(key, "tags are not allowed"));
        }
        Ok(MetaValue::Text(value.to_uppercase()))
    });
    let err = reader.read(&path).unwrap_err();
    assert_eq!(err.to_string(), "metadata field `tags`: tags are not allowed");

    let path = fx.write("clean.md", "---\ntitle: hello\n---\nBody");
    let doc = reader.read(&path).unwrap();
    assert_eq!(doc.metadata.text("title"), Some("HELLO"));
    assert_eq!(doc.metadata.text("toc"), Some("<NAV>TOC</NAV>"));
}

#[test]
fn unsupported_argument_stops_before_converting() {
    let mut fx = Fixture::new();
    fx.config.pandoc.args = vec!["--standalone".into()];
    let path = fx.write("post.md", "---\ntitle: T\n---\nBody");

    let err = fx.reader().read(&path).unwrap_err();
    assert_eq!(err.to_string(), "Argument --standalone is not supported.");
    assert!(fx.calls().is_empty());
}

#[test]
fn front_matter_errors_stop_before_converting() {
    let fx = Fixture::new();
    let cases = [
        ("empty.md", "", "Could not find metadata. File is empty."),
        ("plain.md", "# Title\nBody", "Could not find metadata header '...' or '---'."),
        ("open.md", "---\ntitle: T\nBody", "Could not find end of metadata block."),
    ];

    for (name, content, message) in cases {
        let path = fx.write(name, content);
        let err = fx.reader().read(&path).unwrap_err();
        assert!(matches!(err, ReaderError::FrontMatter(_)), "{name}: {err}");
        assert_eq!(err.to_string(), message);
    }
    assert!(fx.calls().is_empty());
}

#[test]
fn converter_failure_carries_status() {
    let mut fx = Fixture::new();
    fx.config.pandoc.args = vec!["--fail".into()];
    let path = fx.write("post.md", "---\n---\nBody");

    match fx.reader().read(&path).unwrap_err() {
        ReaderError::ConverterExecution { status, stderr, .. } => {
            assert_eq!(status.code(), Some(7));
            assert_eq!(stderr, "boom");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_file_is_io_error() {
    let fx = Fixture::new();
    let err = fx.reader().read(Path::new("/nowhere/post.md")).unwrap_err();
    assert!(matches!(err, ReaderError::Io(..)));
}

#[test]
fn defaults_mode_with_citations() {
    let mut fx = Fixture::new();
    let defaults = fx.write(
        "html.yaml",
        "reader: markdown+citations\nwriter: html5\nciteproc: true\n",
    );
    fx.config.pandoc.default_files = vec![defaults.clone()];
    fx.write("paper.bib", "@book{a, title={A}}");
    let path = fx.write("paper.md", "---\ntitle: Paper\n---\nSee [@a].");

    fx.reader().read(&path).unwrap();
    assert_eq!(
        fx.calls(),
        vec![format!(
            "--defaults={} --bibliography={}",
            defaults.display(),
            fx.dir.path().join("paper.bib").display()
        )]
    );
}

#[test]
fn invalid_defaults_file_is_reported() {
    let mut fx = Fixture::new();
    let defaults = fx.write("latex.yaml", "reader: markdown\nwriter: latex\n");
    fx.config.pandoc.default_files = vec![defaults];
    let path = fx.write("post.md", "---\n---\nBody");

    let err = fx.reader().read(&path).unwrap_err();
    assert!(err.to_string().ends_with("Output format type must be either html or html5."));
    assert!(fx.calls().is_empty());
}

#[test]
fn registry_dispatches_by_extension() {
    let fx = Fixture::new();
    let mut registry = ReaderRegistry::new();
    register(&mut registry, Arc::new(fx.config.clone()));

    let path = fx.write("note.mdown", "---\ntitle: N\n---\nHi");
    let reader = registry.reader_for(&path).unwrap();
    assert_eq!(reader.read(&path).unwrap().html, "<p>Hi</p>");
    assert!(registry.reader_for(Path::new("note.rst")).is_none());
}
