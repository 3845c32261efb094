//! A sort on a worker thread, presented from the test thread.

use std::thread;
use std::time::Duration;

use pretty_assertions::assert_eq;
use sortvis::core::Result;
use sortvis::prelude::*;
use sortvis::terminal::TerminalBackend;

/// Counts glyphs and frames instead of writing to a terminal.
#[derive(Default)]
struct CountingBackend {
    glyphs: usize,
    flushes: usize,
}

impl TerminalBackend for CountingBackend {
    fn hide_cursor(&mut self) -> Result<()> {
        Ok(())
    }

    fn show_cursor(&mut self) -> Result<()> {
        Ok(())
    }

    fn move_cursor(&mut self, _x: u16, _y: u16) -> Result<()> {
        Ok(())
    }

    fn size(&self) -> Result<(u16, u16)> {
        Ok((40, 20))
    }

    fn enter_alternate_screen(&mut self) -> Result<()> {
        Ok(())
    }

    fn leave_alternate_screen(&mut self) -> Result<()> {
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.flushes += 1;
        Ok(())
    }

    fn set_foreground(&mut self, _color: Color) -> Result<()> {
        Ok(())
    }

    fn set_background(&mut self, _color: Color) -> Result<()> {
        Ok(())
    }

    fn reset_style(&mut self) -> Result<()> {
        Ok(())
    }

    fn write_str(&mut self, _s: &str) -> Result<()> {
        self.glyphs += 1;
        Ok(())
    }

    fn begin_sync_update(&mut self) -> Result<()> {
        Ok(())
    }

    fn end_sync_update(&mut self) -> Result<()> {
        Ok(())
    }
}

fn insertion_sort<A: SortArray>(arr: &mut A) -> SortResult<()> {
    for i in 1..arr.len() {
        let mut j = i;
        while j > 0 && arr.compare(j - 1, j)?.is_gt() {
            arr.swap(j - 1, j)?;
            j -= 1;
        }
        arr.set_inactive_range(0..i + 1);
    }
    arr.set_done_range(0..arr.len());
    Ok(())
}

#[test_log::test]
fn test_presenter_follows_worker_to_completion() {
    // 20 elements at speed 400: 8 operations per 20ms frame
    let mut arr = VisualSortArray::new(VisualizerConfig::new(20, 2, 400.0)).unwrap();
    let canvas = arr.canvas().clone();

    let worker = thread::spawn(move || arr.run(|arr| insertion_sort(arr)));

    let mut presenter =
        TerminalPresenter::with_frame_pacer(CountingBackend::default(), FramePacer::new(200));
    let rendered = presenter.run(&canvas, || !worker.is_finished()).unwrap();

    let stats = worker.join().unwrap().unwrap();
    assert!(stats.comparisons >= 19);
    assert!(rendered >= 2);
    // 40x40 pixels on a 40x20 terminal: 800 cells per frame
    assert_eq!(presenter.backend().glyphs, rendered as usize * 800);
    assert!(presenter.backend().flushes as u64 >= rendered);
}

#[test]
fn test_stop_ends_a_slow_run() {
    // speed 2: 500ms pause after every operation
    let arr = VisualSortArray::new(VisualizerConfig::new(30, 1, 2.0)).unwrap();
    let stop = arr.stop_handle();
    let counters = arr.counters();

    let worker = thread::spawn(move || {
        let mut arr = arr;
        arr.run(|arr| insertion_sort(arr))
    });

    thread::sleep(Duration::from_millis(100));
    stop.request_stop();

    let err = worker.join().unwrap().unwrap_err();
    assert_eq!(err, RunError::Cancelled(Cancelled));
    assert_eq!(counters.snapshot().comparisons, 1);
}
