//! Tests for document processing chains

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use conduit::config::{ComponentConfig, ComponentSpec};
use conduit::docproc::processors;
use conduit::docproc::{
    AppendSuffix, ChainOutcome, Document, DocumentProcessor, FieldValue, ProcessingChain, Progress, RequireField,
    SetField,
};

fn title(doc: &Document) -> Option<&str> {
    doc.field_value("title").and_then(FieldValue::as_str)
}

/// Records the title it observes, then appends its tag.
struct Observer {
    tag: &'static str,
    seen: Arc<Mutex<Vec<String>>>,
}

impl DocumentProcessor for Observer {
    fn name(&self) -> &str {
        self.tag
    }

    fn process(&self, document: &mut Document) -> Progress {
        let current = title(document).unwrap_or_default().to_string();
        self.seen.lock().unwrap().push(current.clone());
        document.set_field_value("title", format!("{current}{}", self.tag));
        Progress::Continue
    }
}

/// Returns a fixed progress and counts invocations.
struct Fixed {
    name: &'static str,
    calls: Arc<AtomicUsize>,
    progress: fn() -> Progress,
}

impl DocumentProcessor for Fixed {
    fn name(&self) -> &str {
        self.name
    }

    fn process(&self, _document: &mut Document) -> Progress {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.progress)()
    }
}

#[test]
fn test_set_title_suffix_scenario() {
    let chain = ProcessingChain::new("default", vec![Arc::new(AppendSuffix::new("title", "Y"))]);
    let mut doc = Document::new("id:test:1").with_field("title", "X");

    assert_eq!(chain.process(&mut doc).unwrap(), ChainOutcome::Completed);
    assert_eq!(title(&doc), Some("X Y"));
}

#[test]
fn test_processors_see_cumulative_mutations_in_order() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let chain = ProcessingChain::new(
        "ordered",
        ["a", "b", "c"]
            .into_iter()
            .map(|tag| Arc::new(Observer { tag, seen: seen.clone() }) as Arc<dyn DocumentProcessor>)
            .collect(),
    );
    let mut doc = Document::new("id:test:1").with_field("title", "");

    assert_eq!(chain.process(&mut doc).unwrap(), ChainOutcome::Completed);
    assert_eq!(*seen.lock().unwrap(), vec!["", "a", "ab"]);
    assert_eq!(title(&doc), Some("abc"));
    assert_eq!(chain.processor_names(), vec!["a", "b", "c"]);
}

#[test]
fn test_skip_remaining_stops_later_processors() {
    let later = Arc::new(AtomicUsize::new(0));
    let chain = ProcessingChain::new(
        "skipping",
        vec![
            Arc::new(SetField::new("title", "touched")),
            Arc::new(Fixed {
                name: "stopper",
                calls: Arc::new(AtomicUsize::new(0)),
                progress: || Progress::SkipRemaining,
            }),
            Arc::new(Fixed {
                name: "never",
                calls: later.clone(),
                progress: || Progress::Continue,
            }),
        ],
    );
    let mut doc = Document::new("id:test:1");

    let outcome = chain.process(&mut doc).unwrap();

    assert_eq!(
        outcome,
        ChainOutcome::Skipped {
            processor: "stopper".to_string(),
            index: 1
        }
    );
    assert_eq!(later.load(Ordering::SeqCst), 0);
    assert_eq!(title(&doc), Some("touched"));
}

#[test]
fn test_failure_reports_processor_and_keeps_earlier_mutations() {
    let later = Arc::new(AtomicUsize::new(0));
    let chain = ProcessingChain::new(
        "failing",
        vec![
            Arc::new(SetField::new("title", "Worst music ever")),
            Arc::new(SetField::new("year", 1999_i64)),
            Arc::new(AppendSuffix::new("artist", "Apple")),
            Arc::new(Fixed {
                name: "never",
                calls: later.clone(),
                progress: || Progress::Continue,
            }),
        ],
    );
    let mut doc = Document::new("id:test:1");

    let failure = chain.process(&mut doc).unwrap_err();

    assert_eq!(failure.processor, "append_suffix");
    assert_eq!(failure.index, 2);
    assert_eq!(
        failure.cause.as_ref().map(|c| c.to_string()),
        Some("field `artist` is not set".to_string())
    );
    assert_eq!(later.load(Ordering::SeqCst), 0);
    assert_eq!(title(&doc), Some("Worst music ever"));
    assert_eq!(doc.field_value("year"), Some(&FieldValue::Integer(1999)));
    assert_eq!(doc.field_value("artist"), None);
}

#[test]
fn test_failure_without_cause() {
    let chain = ProcessingChain::new(
        "bare",
        vec![Arc::new(Fixed {
            name: "bare_fail",
            calls: Arc::new(AtomicUsize::new(0)),
            progress: || Progress::Fail(None),
        })],
    );

    let failure = chain.process(&mut Document::new("id:test:1")).unwrap_err();
    assert_eq!(failure.processor, "bare_fail");
    assert!(failure.cause.is_none());
}

#[test]
fn test_require_field_guards_chain() {
    let chain = ProcessingChain::new(
        "guarded",
        vec![
            Arc::new(RequireField::new("title")),
            Arc::new(AppendSuffix::new("title", "Apple")),
        ],
    );

    let mut with_title = Document::new("id:test:1").with_field("title", "Music");
    assert_eq!(chain.process(&mut with_title).unwrap(), ChainOutcome::Completed);
    assert_eq!(title(&with_title), Some("Music Apple"));

    let mut without_title = Document::new("id:test:2");
    assert!(matches!(
        chain.process(&mut without_title).unwrap(),
        ChainOutcome::Skipped { index: 0, .. }
    ));
    assert!(without_title.is_empty());
}

#[test]
fn test_empty_chain_completes() {
    let chain = ProcessingChain::new("empty", Vec::new());
    let mut doc = Document::new("id:test:1").with_field("title", "X");

    assert!(chain.is_empty());
    assert_eq!(chain.process(&mut doc).unwrap(), ChainOutcome::Completed);
    assert_eq!(title(&doc), Some("X"));
}

#[test]
fn test_one_chain_processes_documents_in_parallel() {
    let chain = ProcessingChain::new("shared", vec![Arc::new(AppendSuffix::new("title", "Apple"))]);

    let results: Vec<String> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let chain = &chain;
                scope.spawn(move || {
                    let mut doc = Document::new(format!("id:test:{i}")).with_field("title", format!("Doc{i}"));
                    chain.process(&mut doc).unwrap();
                    title(&doc).unwrap().to_string()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (i, result) in results.iter().enumerate() {
        assert_eq!(result, &format!("Doc{i} Apple"));
    }
}

#[test]
fn test_build_processors_from_config() {
    let specs = [
        ComponentSpec::new("require_field", ComponentConfig::new().with("field", "title")),
        ComponentSpec::new("set_field", ComponentConfig::new().with("field", "title").with("value", "Worst")),
        ComponentSpec::new("append_suffix", ComponentConfig::new().with("field", "title").with("suffix", "ever")),
    ];
    let processors = specs
        .iter()
        .map(processors::build)
        .collect::<anyhow::Result<Vec<_>>>()
        .unwrap();
    let chain = ProcessingChain::new("configured", processors);

    let mut doc = Document::new("id:test:1").with_field("title", "Good");
    chain.process(&mut doc).unwrap();

    assert_eq!(title(&doc), Some("Worst ever"));
}

#[test]
fn test_build_processor_rejects_unknown_kind() {
    let spec = ComponentSpec::new("tokenize", ComponentConfig::new());
    let err = processors::build(&spec).err().unwrap();
    assert!(err.to_string().contains("unknown processor kind"));
}
