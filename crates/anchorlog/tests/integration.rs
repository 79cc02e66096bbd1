//! Integration tests for anchorlog roots, decorators and anchors working
//! together:
//! - Anchored lines on a terminal root (ordering, removal, filtering)
//! - Concurrent callers and concurrent shutdown
//! - Tees across a terminal and a plain root
//! - Config-built roots

use std::sync::{Arc, Barrier};
use std::thread;

use anchorlog::testing::{CaptureSink, TerminalModel};
use anchorlog::{
    Field, Level, LogError, Logger, LoggerConfig, MergeContext, OutputFormat, RootLogger, StreamLogger,
    TerminalLogger, TextPrinter, add_anchor, remove_anchor, root_tee, with_fields,
};

fn terminal(sink: &CaptureSink) -> Arc<TerminalLogger> {
    Arc::new(TerminalLogger::new(sink.clone(), TextPrinter::new().with_level(false)).unwrap())
}

fn screen(sink: &CaptureSink) -> TerminalModel {
    let mut model = TerminalModel::new();
    model.feed(sink.raw().as_bytes());
    model
}

// ============================================================================
// Anchored lines
// ============================================================================

#[test]
fn anchors_display_in_creation_order() {
    let sink = CaptureSink::new();
    let root = terminal(&sink);
    let log = root.clone().into_logger();

    let anchors: Vec<_> = (0..3).map(|_| add_anchor(&log)).collect();
    anchors[0].transient("A", &[]);
    anchors[1].transient("B", &[]);
    anchors[2].transient("C", &[]);
    root.close().unwrap();

    assert_eq!(screen(&sink).lines(), ["A", "B", "C"]);
}

#[test]
fn removing_a_middle_anchor_closes_the_gap() {
    let sink = CaptureSink::new();
    let root = terminal(&sink);
    let log = root.clone().into_logger();

    let anchors: Vec<_> = (0..3).map(|_| add_anchor(&log)).collect();
    for (anchor, text) in anchors.iter().zip(["A", "B", "C"]) {
        anchor.transient(text, &[]);
    }
    remove_anchor(&anchors[1]);
    root.close().unwrap();

    let model = screen(&sink);
    assert_eq!(model.lines(), ["A", "C"]);
    assert_eq!(model.cursor(), (2, 0));
}

#[test]
fn scrolling_output_stays_above_anchors() {
    let sink = CaptureSink::new();
    let root = terminal(&sink);
    let log = root.clone().into_logger();

    let bar = add_anchor(&log);
    for i in 1..=3u8 {
        bar.transient("working", &[Field::uint("step", i)]);
        log.info("finished", &[Field::uint("step", i)]);
    }
    root.close().unwrap();

    let lines = screen(&sink).lines();
    assert_eq!(lines.len(), 4);
    assert!(lines[..3].iter().all(|l| l.starts_with("finished")));
    assert!(lines[3].starts_with("working"));
    assert!(lines[3].ends_with("step=3"));
}

#[test]
fn anchor_exemption_applies_to_transient_only() {
    let sink = CaptureSink::new();
    let root = terminal(&sink);
    root.set_min_level(Level::Error);
    let log = root.clone().into_logger();

    let custom = with_fields(&log, &[Field::int("x", 1i32)]);
    let anchor = add_anchor(&custom);
    anchor.info("suppressed", &[]);
    anchor.transient("shown", &[]);
    root.close().unwrap();

    sink.assert_not_contains("suppressed");
    assert!(sink.matches(r"shown\s+x=1"));
}

#[test]
fn remove_anchor_is_idempotent() {
    let run = |removes: usize| {
        let sink = CaptureSink::new();
        let root = terminal(&sink);
        let log = root.clone().into_logger();

        let anchor = add_anchor(&log);
        anchor.transient("progress", &[]);
        for _ in 0..removes {
            remove_anchor(&anchor);
        }
        assert_eq!(root.live_anchors(), 0);
        log.info("done", &[]);
        root.close().unwrap();
        sink.raw()
    };

    assert_eq!(run(1), run(3));
}

#[test]
fn concurrent_removes_release_once() {
    let sink = CaptureSink::new();
    let root = terminal(&sink);
    let log = root.clone().into_logger();
    let anchor = add_anchor(&log);
    let barrier = Arc::new(Barrier::new(4));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let anchor = Arc::clone(&anchor);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                remove_anchor(&anchor);
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(root.live_anchors(), 0);
    root.close().unwrap();
}

#[test]
fn anchoring_without_a_terminal_falls_back() {
    let sink = CaptureSink::new();
    let root = Arc::new(StreamLogger::new(sink.clone(), TextPrinter::new().with_level(false)));
    let log = root.clone().into_logger();

    let anchor = add_anchor(&log);
    anchor.transient("invisible", &[]);
    anchor.info("visible", &[]);
    remove_anchor(&anchor);
    root.close().unwrap();

    assert_eq!(sink.raw(), "visible\n");
}

#[test]
fn transient_after_release_is_filtered() {
    let sink = CaptureSink::new();
    let root = terminal(&sink);
    let log = root.clone().into_logger();

    let anchor = add_anchor(&log);
    remove_anchor(&anchor);
    anchor.transient("late", &[]);
    anchor.info("still logs", &[]);
    root.close().unwrap();

    sink.assert_not_contains("late");
    assert_eq!(screen(&sink).lines(), ["still logs"]);
}

// ============================================================================
// Concurrency and lifecycle
// ============================================================================

#[test]
fn concurrent_callers_both_appear() {
    let sink = CaptureSink::new();
    let root = terminal(&sink);
    let barrier = Arc::new(Barrier::new(2));

    let handles: Vec<_> = ["M1", "M2"]
        .into_iter()
        .map(|msg| {
            let root = Arc::clone(&root);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                root.info(msg, &[]);
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    root.close().unwrap();

    let mut lines = sink.lines();
    lines.sort();
    assert_eq!(lines, ["M1", "M2"]);
}

#[test]
fn concurrent_close_drains_once() {
    let sink = CaptureSink::new();
    let root = terminal(&sink);
    for i in 0..100u32 {
        root.info("queued", &[Field::uint("i", i)]);
    }

    let barrier = Arc::new(Barrier::new(2));
    let handles: Vec<_> = (0..2)
        .map(|_| {
            let root = Arc::clone(&root);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                root.close()
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap().unwrap();
    }

    assert!(root.is_closed());
    assert_eq!(sink.lines().len(), 100);
    assert!(sink.lines()[99].ends_with("i=99"));
}

#[test]
fn fatal_drains_before_returning() {
    let sink = CaptureSink::new();
    let root = terminal(&sink);
    root.info("before", &[]);
    root.log_impl(Level::Fatal, "boom", &[], &[], MergeContext::new());

    assert!(root.is_closed());
    assert_eq!(sink.lines(), ["before", "boom"]);
}

#[test]
fn dropping_the_root_closes_it() {
    let sink = CaptureSink::new();
    {
        let root = terminal(&sink);
        root.info("flushed on drop", &[]);
    }
    assert_eq!(sink.raw(), "flushed on drop\n");
}

// ============================================================================
// Tees
// ============================================================================

#[test]
fn tee_keeps_anchors_on_the_terminal_side() {
    let screen_sink = CaptureSink::new();
    let file_sink = CaptureSink::new();
    let term: Arc<dyn RootLogger> = terminal(&screen_sink);
    let file: Arc<dyn RootLogger> =
        Arc::new(StreamLogger::new(file_sink.clone(), TextPrinter::new().with_level(false)));
    let both = root_tee(term, file);
    let log = both.clone().into_logger();

    let bar = add_anchor(&log);
    bar.transient("50%", &[]);
    log.warning("disk almost full", &[]);
    remove_anchor(&bar);
    both.close().unwrap();

    assert_eq!(screen(&screen_sink).lines(), ["disk almost full"]);
    assert!(screen_sink.raw().contains("50%"));
    assert_eq!(file_sink.raw(), "disk almost full\n");
}

// ============================================================================
// Config-built roots
// ============================================================================

#[test]
fn config_builds_json_lines() {
    let sink = CaptureSink::new();
    let root = LoggerConfig::new()
        .with_format(OutputFormat::Json)
        .build(sink.clone(), false)
        .unwrap();
    let log = with_fields(&root.clone().into_logger(), &[Field::string("service", "api")]);
    log.info("ready", &[Field::uint("port", 8080u16)]);
    root.close().unwrap();

    let value: serde_json::Value = serde_json::from_str(sink.raw().trim_end()).unwrap();
    assert_eq!(value["msg"], "ready");
    assert_eq!(value["service"], "api");
    assert_eq!(value["port"], 8080);
}

#[test]
fn config_terminal_root_anchors() {
    let sink = CaptureSink::new();
    let root = LoggerConfig::new()
        .without_color()
        .with_level(false)
        .build(sink.clone(), true)
        .unwrap();
    let log = root.clone().into_logger();
    let bar = add_anchor(&log);
    bar.transient("syncing", &[]);
    root.close().unwrap();

    assert_eq!(screen(&sink).lines(), ["syncing"]);
}

#[test]
fn closing_twice_through_the_trait_is_fine() {
    let sink = CaptureSink::new();
    let root: Arc<dyn RootLogger> = terminal(&sink);
    root.close().unwrap();
    let second: Result<(), LogError> = root.close();
    assert!(second.is_ok());
}
