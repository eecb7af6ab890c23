use egui_timegrid::{GridEngine, GridRenderTarget, GridStats};
use pretty_assertions::assert_eq;
use std::collections::HashSet;

#[derive(Clone, Debug, PartialEq)]
enum Call {
    Bar { tick: i64, bar: i64 },
    Beat { tick: i64, bar: i64, beat: i64 },
    Subdivision { tick: i64, level: usize, level_count: usize },
}

impl Call {
    fn tick(&self) -> i64 {
        match *self {
            Call::Bar { tick, .. } | Call::Beat { tick, .. } | Call::Subdivision { tick, .. } => {
                tick
            }
        }
    }
}

/// Records every draw call together with the opacity it was made at.
struct Recorder {
    ambient: f64,
    opacity: f64,
    calls: Vec<(Call, f64)>,
}

impl Recorder {
    fn new() -> Self {
        Self::with_opacity(1.0)
    }

    fn with_opacity(opacity: f64) -> Self {
        Self {
            ambient: opacity,
            opacity,
            calls: Vec::new(),
        }
    }

    fn bars(&self) -> Vec<i64> {
        self.ticks(|c| matches!(c, Call::Bar { .. }))
    }

    fn beats(&self) -> Vec<i64> {
        self.ticks(|c| matches!(c, Call::Beat { .. }))
    }

    fn subdivisions(&self) -> Vec<i64> {
        self.ticks(|c| matches!(c, Call::Subdivision { .. }))
    }

    fn ticks(&self, filter: impl Fn(&Call) -> bool) -> Vec<i64> {
        self.calls
            .iter()
            .filter(|(c, _)| filter(c))
            .map(|(c, _)| c.tick())
            .collect()
    }

    fn opacity_at(&self, tick: i64) -> f64 {
        self.calls
            .iter()
            .find(|(c, _)| c.tick() == tick)
            .map(|(_, o)| *o)
            .unwrap()
    }
}

impl GridRenderTarget for Recorder {
    fn opacity(&self) -> f64 {
        self.opacity
    }

    fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity;
    }

    fn draw_bar(&mut self, tick: i64, bar: i64) {
        self.calls.push((Call::Bar { tick, bar }, self.opacity));
    }

    fn draw_beat(&mut self, tick: i64, bar: i64, beat: i64) {
        self.calls.push((Call::Beat { tick, bar, beat }, self.opacity));
    }

    fn draw_subdivision(&mut self, tick: i64, level: usize, level_count: usize) {
        self.calls.push((
            Call::Subdivision {
                tick,
                level,
                level_count,
            },
            self.opacity,
        ));
    }
}

fn render(engine: &GridEngine, start: f64, end: f64, width: f64) -> (Recorder, GridStats) {
    let mut recorder = Recorder::new();
    let stats = engine.render_grid(&mut recorder, start, end, width);
    (recorder, stats)
}

fn assert_no_duplicates(recorder: &Recorder) {
    let mut seen = HashSet::new();
    for (call, _) in &recorder.calls {
        assert!(seen.insert(call.tick()), "tick {} drawn twice", call.tick());
    }
}

#[test]
fn two_bars_of_four_four() {
    let engine = GridEngine::new();
    // 3840 ticks over 1920 points: two ticks per point.
    let (recorder, stats) = render(&engine, 0.0, 3840.0, 1920.0);

    assert_eq!(recorder.bars(), vec![0, 1920, 3840]);
    assert_eq!(recorder.beats(), vec![480, 960, 1440, 2400, 2880, 3360]);
    for tick in recorder.bars() {
        assert_eq!(recorder.opacity_at(tick), 1.0);
    }

    let subdivisions = recorder.subdivisions();
    assert_eq!(subdivisions.len(), 24);
    assert!(subdivisions.iter().all(|t| t % 480 != 0));
    for (call, opacity) in &recorder.calls {
        assert_eq!(*opacity, 1.0);
        if let Call::Subdivision {
            tick,
            level,
            level_count,
        } = *call
        {
            assert_eq!(level_count, 2);
            let expected = if tick % 240 == 0 { 0 } else { 1 };
            assert_eq!(level, expected, "tick {tick}");
        }
    }

    assert_eq!(
        stats,
        GridStats {
            bars: 3,
            beats: 6,
            subdivisions: 24
        }
    );
    assert_no_duplicates(&recorder);
}

#[test]
fn bar_and_beat_indices_are_one_based() {
    let engine = GridEngine::new();
    let (recorder, _) = render(&engine, 0.0, 3840.0, 1920.0);
    let calls: Vec<_> = recorder
        .calls
        .iter()
        .map(|(c, _)| c.clone())
        .filter(|c| !matches!(c, Call::Subdivision { .. }))
        .take(5)
        .collect();
    assert_eq!(
        calls,
        vec![
            Call::Bar { tick: 0, bar: 1 },
            Call::Bar { tick: 1920, bar: 2 },
            Call::Bar { tick: 3840, bar: 3 },
            Call::Beat {
                tick: 480,
                bar: 1,
                beat: 2
            },
            Call::Beat {
                tick: 960,
                bar: 1,
                beat: 3
            },
        ]
    );
}

#[test]
fn passes_run_bars_then_beats_then_subdivisions() {
    let engine = GridEngine::new();
    let (recorder, _) = render(&engine, 0.0, 3840.0, 1920.0);
    let rank = |c: &Call| match c {
        Call::Bar { .. } => 0,
        Call::Beat { .. } => 1,
        Call::Subdivision { .. } => 2,
    };
    let ranks: Vec<_> = recorder.calls.iter().map(|(c, _)| rank(c)).collect();
    let mut sorted = ranks.clone();
    sorted.sort();
    assert_eq!(ranks, sorted);
}

#[test]
fn negative_ticks_floor_to_the_previous_bar() {
    let engine = GridEngine::new();
    let (recorder, _) = render(&engine, -500.0, 500.0, 500.0);
    assert_eq!(recorder.bars(), vec![-1920, 0]);
    assert_eq!(recorder.calls[0].0, Call::Bar {
        tick: -1920,
        bar: 0
    });
    let beats: Vec<_> = recorder
        .calls
        .iter()
        .filter_map(|(c, _)| match *c {
            Call::Beat { tick, bar, beat } => Some((tick, bar, beat)),
            _ => None,
        })
        .collect();
    assert_eq!(beats, vec![(-960, 0, 3), (-480, 0, 4), (480, 1, 2)]);
}

#[test]
fn empty_or_degenerate_views_draw_nothing() {
    let engine = GridEngine::new();
    for (start, end, width) in [
        (0.0, 0.0, 100.0),
        (100.0, 50.0, 100.0),
        (0.0, 3840.0, 0.0),
        (0.0, 3840.0, -10.0),
        (0.0, f64::INFINITY, 100.0),
        (f64::NAN, 3840.0, 100.0),
    ] {
        let (recorder, stats) = render(&engine, start, end, width);
        assert!(recorder.calls.is_empty());
        assert_eq!(stats, GridStats::default());
    }
}

#[test]
fn disabled_fade_draws_everything_opaque() {
    let mut engine = GridEngine::new();
    engine.set_minimum_spacing(0.0);
    // 40 ticks per point would hide every subdivision with a fade.
    let (recorder, stats) = render(&engine, 0.0, 3840.0, 96.0);
    assert!(recorder.calls.iter().all(|(_, o)| *o == 1.0));
    assert_eq!(stats.bars, 3);
    assert_eq!(stats.beats, 6);
    assert_eq!(stats.subdivisions, 24);
}

#[test]
fn fine_levels_fade_in_smoothly() {
    let engine = GridEngine::new();
    // Six ticks per point: sixteenths are 20 points apart, inside the fade window.
    let (recorder, _) = render(&engine, 0.0, 3840.0, 640.0);
    let eighth = recorder.opacity_at(240);
    let sixteenth = recorder.opacity_at(120);
    assert_eq!(eighth, 1.0);
    assert!(sixteenth > 0.0 && sixteenth < 1.0, "{sixteenth}");
    assert_no_duplicates(&recorder);
}

#[test]
fn ambient_opacity_is_multiplied_and_restored() {
    let engine = GridEngine::new();
    let mut recorder = Recorder::with_opacity(0.5);
    engine.render_grid(&mut recorder, 0.0, 3840.0, 640.0);
    assert_eq!(recorder.opacity, recorder.ambient);
    assert_eq!(recorder.opacity_at(0), 0.5);
    let sixteenth = recorder.opacity_at(120);
    assert!(sixteenth > 0.0 && sixteenth < 0.5);
}

#[test]
fn crowded_bars_skip_and_fade() {
    let engine = GridEngine::new();
    // 192 ticks per point: bars are 10 points apart.
    let (recorder, stats) = render(&engine, 0.0, 192.0 * 1000.0, 1000.0);
    let bars = recorder.bars();
    assert!(bars.iter().all(|t| t % 3840 == 0));
    assert_eq!(recorder.opacity_at(7680), 1.0);
    let faded = recorder.opacity_at(3840);
    assert!(faded > 0.0 && faded < 1.0);
    assert_eq!(stats.beats, 0);
    assert_eq!(stats.subdivisions, 0);
}

#[test]
fn no_tick_is_drawn_twice_at_any_zoom() {
    let mut engine = GridEngine::new();
    for (numerator, denominator) in [(4, 4), (3, 4), (7, 8), (5, 16), (6, 3)] {
        engine.set_time_signature(numerator, denominator);
        for quantize in [4, 8, 12, 16, 32, 64, 128] {
            engine.set_quantize(quantize);
            for width in [10.0, 100.0, 400.0, 1600.0, 6400.0, 25600.0] {
                let (recorder, _) = render(&engine, -1000.0, 9000.0, width);
                assert_no_duplicates(&recorder);
            }
        }
    }
}

#[test]
fn triplet_quantize_gets_its_own_level() {
    let mut engine = GridEngine::new();
    engine.set_quantize(12);
    let (recorder, _) = render(&engine, 0.0, 1920.0, 1920.0);
    let subdivisions = recorder.subdivisions();
    assert!(subdivisions.contains(&160));
    assert!(subdivisions.iter().all(|t| t % 160 == 0 && t % 480 != 0));
}
