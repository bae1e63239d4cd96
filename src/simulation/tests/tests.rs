use super::*;
use crate::domain::events::AudioEventKind;
use crate::domain::materials::{
    MAT_EMPTY, MAT_FIRE, MAT_LAST_BUILTIN, MAT_NULL, MAT_SAND, MAT_SMOKE, MAT_STONE, MAT_WATER,
    MAT_WOOD,
};

fn seeded(width: u32, height: u32) -> Engine {
    Engine::with_settings(
        width,
        height,
        Arc::new(MaterialRegistry::with_defaults()),
        EngineSettings::seeded(1234),
    )
    .unwrap()
}

fn run_ticks(engine: &mut Engine, n: usize) {
    for _ in 0..n {
        engine.tick();
    }
}

/// Sand pile, a pool, a stone shelf, and a burning wooden beam
fn busy_scene(engine: &mut Engine) {
    for x in 10..50 {
        engine.paint(x, 55, MAT_STONE, 0);
    }
    engine.paint(20, 10, MAT_SAND, 6);
    engine.paint(40, 20, MAT_WATER, 7);
    for x in 5..30 {
        engine.paint(x, 40, MAT_WOOD, 0);
    }
    engine.paint(5, 39, MAT_FIRE, 0);
}

fn stone_cells(engine: &Engine) -> Vec<usize> {
    engine
        .materials()
        .iter()
        .enumerate()
        .filter(|&(_, &m)| m == MAT_STONE)
        .map(|(i, _)| i)
        .collect()
}

#[test]
fn material_ids_stay_registered_and_out_of_range_reads_are_null() {
    let mut engine = seeded(64, 64);
    busy_scene(&mut engine);
    run_ticks(&mut engine, 300);

    assert!(engine.materials().iter().all(|&m| m <= MAT_LAST_BUILTIN));
    assert!(engine.cells().iter().all(|c| c.material <= MAT_LAST_BUILTIN));
    assert_eq!(engine.read(-1, 0).material, MAT_NULL);
    assert_eq!(engine.read(0, 64).material, MAT_NULL);
    assert_eq!(engine.read(64, 63), Cell::NULL);
    assert!(engine.grid.shadow_in_sync());
}

#[test]
fn sand_water_and_stone_conserve_their_counts() {
    let mut engine = seeded(48, 48);
    for x in 0..48 {
        engine.paint(x, 30 + (x % 5), MAT_STONE, 0);
    }
    engine.paint(12, 8, MAT_SAND, 5);
    engine.paint(30, 6, MAT_WATER, 5);
    engine.paint(24, 14, MAT_SAND, 3);
    engine.paint(16, 20, MAT_WATER, 4);

    let sand = engine.count_material(MAT_SAND);
    let water = engine.count_material(MAT_WATER);
    let total = engine.non_empty_count();
    let stones = stone_cells(&engine);

    for _ in 0..400 {
        engine.tick();
        assert_eq!(engine.non_empty_count(), total);
    }
    assert_eq!(engine.count_material(MAT_SAND), sand);
    assert_eq!(engine.count_material(MAT_WATER), water);
    assert_eq!(stone_cells(&engine), stones);
}

#[test]
fn seeded_runs_are_identical() {
    let mut a = seeded(64, 64);
    let mut b = seeded(64, 64);
    busy_scene(&mut a);
    busy_scene(&mut b);

    for _ in 0..250 {
        a.tick();
        b.tick();
    }
    assert_eq!(a.materials(), b.materials());
    assert_eq!(a.take_audio_events(), b.take_audio_events());
}

#[test]
fn lone_sand_falls_one_row_per_tick() {
    let height = 20;
    let mut engine = seeded(5, height);
    engine.paint(2, 0, MAT_SAND, 0);
    let step = engine.settings().fixed_step;

    for t in 1..height {
        assert_eq!(engine.update(step), 1, "tick {}", t);
        assert_eq!(engine.read(2, t as i32).material, MAT_SAND, "tick {}", t);
        assert_eq!(engine.non_empty_count(), 1);
    }

    // resting on the floor
    assert_eq!(engine.update(step), 1);
    assert_eq!(engine.read(2, height as i32 - 1).material, MAT_SAND);
}

#[test]
fn stone_is_never_overwritten_by_moves_or_swaps() {
    let mut engine = seeded(4, 4);
    engine.paint(1, 2, MAT_STONE, 0);
    engine.paint(1, 1, MAT_SAND, 0);
    engine.paint(2, 1, MAT_WATER, 0);

    let (results, _) = engine.run_tick(|ctx, _| {
        [
            ctx.try_move(1, 1, 1, 2, Cell::of(MAT_SAND)),
            ctx.try_swap(1, 1, 1, 2, Cell::of(MAT_SAND)),
            ctx.try_move(2, 1, 1, 2, Cell::of(MAT_WATER)),
            ctx.try_swap(2, 1, 1, 2, Cell::of(MAT_WATER)),
        ]
    });
    assert_eq!(results, [false; 4]);
    assert_eq!(engine.read(1, 2).material, MAT_STONE);

    // and under a full simulation with everything piling on it
    let mut engine = seeded(32, 32);
    for x in 0..32 {
        engine.paint(x, 25, MAT_STONE, 0);
    }
    let stones = stone_cells(&engine);
    engine.paint(10, 10, MAT_SAND, 6);
    engine.paint(22, 10, MAT_WATER, 6);
    run_ticks(&mut engine, 200);
    assert_eq!(stone_cells(&engine), stones);
}

#[test]
fn second_dirty_drain_reports_nothing() {
    let mut engine = seeded(16, 16);
    engine.paint(4, 4, MAT_SAND, 1);
    assert!(engine.take_dirty_rect().is_some());
    assert_eq!(engine.take_dirty_rect(), None);

    // writes made by a tick are drained the same way
    engine.paint(4, 15, MAT_STONE, 0);
    engine.take_dirty_rect();
    engine.tick();
    let rect = engine.take_dirty_rect().unwrap();
    assert!(rect.contains(4, 3) || rect.contains(4, 6), "falling sand must be covered");
    assert_eq!(engine.take_dirty_rect(), None);
}

#[test]
fn dirty_rect_covers_every_changed_cell() {
    let mut engine = seeded(40, 40);
    busy_scene_small(&mut engine);
    engine.take_dirty_rect();

    for _ in 0..30 {
        let before = engine.materials().to_vec();
        engine.tick();
        let rect = engine.take_dirty_rect();
        for (i, (&old, &new)) in before.iter().zip(engine.materials()).enumerate() {
            if old != new {
                let (x, y) = engine.grid.coords(i);
                let r = rect.expect("change without dirty rect");
                assert!(r.contains(x, y), "({}, {}) changed outside {:?}", x, y, r);
            }
        }
    }
}

fn busy_scene_small(engine: &mut Engine) {
    engine.paint(10, 5, MAT_SAND, 3);
    engine.paint(25, 5, MAT_WATER, 3);
    for x in 5..20 {
        engine.paint(x, 30, MAT_WOOD, 0);
    }
    engine.paint(5, 29, MAT_FIRE, 0);
}

#[test]
fn paint_radius_zero_touches_exactly_one_cell() {
    let mut engine = seeded(10, 10);
    let painted = engine.paint(3, 7, MAT_STONE, 0);
    assert_eq!(painted, 1);
    assert_eq!(engine.non_empty_count(), 1);
    assert_eq!(engine.read(3, 7).material, MAT_STONE);
    assert_eq!(engine.take_dirty_rect(), Some(DirtyRect { x: 3, y: 7, w: 1, h: 1 }));

    let events = engine.take_audio_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, AudioEventKind::Paint);
    assert_eq!((events[0].x, events[0].y), (3, 7));
}

#[test]
fn paint_disc_is_clamped_to_grid() {
    let mut engine = seeded(10, 10);
    // r = 2 disc has 13 cells; centred on the corner only the quarter remains
    let painted = engine.paint(0, 0, MAT_SAND, 2);
    assert_eq!(painted, 6);
    assert_eq!(engine.take_dirty_rect(), Some(DirtyRect { x: 0, y: 0, w: 3, h: 3 }));
    // the corner of the bounding square is outside the disc
    assert_eq!(engine.read(2, 2).material, MAT_EMPTY);
}

#[test]
fn paint_no_op_cases_leave_no_trace() {
    let mut engine = seeded(10, 10);
    assert_eq!(engine.paint(5, 5, MAT_SAND, -1), 0);
    assert_eq!(engine.paint(50, 50, MAT_SAND, 3), 0);
    assert_eq!(engine.paint(5, 5, 42, 2), 0);
    assert_eq!(engine.take_dirty_rect(), None);
    assert!(engine.take_audio_events().is_empty());
    assert_eq!(engine.non_empty_count(), 0);
}

#[test]
fn paint_with_empty_erases() {
    let mut engine = seeded(10, 10);
    engine.paint(5, 5, MAT_STONE, 3);
    let before = engine.non_empty_count();
    engine.paint(5, 5, MAT_EMPTY, 1);
    assert_eq!(engine.non_empty_count(), before - 5);
}

#[test]
fn small_deltas_tick_exactly_at_the_crossing() {
    let mut engine = seeded(8, 8);
    let dt = engine.settings().fixed_step * 0.4;

    assert_eq!(engine.update(dt), 0);
    assert_eq!(engine.update(dt), 0);
    assert_eq!(engine.update(dt), 1);
    assert_eq!(engine.tick_count(), 1);
    assert!(engine.accumulator() < engine.settings().fixed_step as f64);
}

#[test]
fn large_delta_runs_a_burst() {
    let mut engine = seeded(8, 8);
    let step = engine.settings().fixed_step;
    assert_eq!(engine.update(step * 5.5), 5);
    assert_eq!(engine.parity(), 1);
}

#[test]
fn huge_backlog_is_counted_not_looped() {
    // 2^25 whole steps: past the point where an f32 running total stops
    // shrinking when one step is subtracted
    let banked = (1u64 << 25) as f64;
    assert_eq!(step::ticks_due(banked, 1.0, false, false), (1 << 25, 0.0));
    assert_eq!(step::ticks_due(banked + 0.5, 1.0, false, false), (1 << 25, 0.5));
    assert_eq!(step::ticks_due(banked, 1.0, true, true), (1, banked - 1.0));
    assert_eq!(step::ticks_due(banked, 1.0, true, false), (0, banked));
    assert_eq!(step::ticks_due(f64::MAX, 1e-9, false, false).0, u32::MAX);
}

#[test]
fn long_pause_banks_time_exactly() {
    let mut engine = seeded(1, 1);
    engine.load_settings_json(r#"{"fixedStep": 1.0}"#).unwrap();
    engine.set_paused(true);

    let dt = (1u32 << 25) as f32;
    assert_eq!(engine.update(dt), 0);
    assert_eq!(engine.accumulator(), dt as f64);

    engine.request_step_once();
    assert_eq!(engine.update(0.0), 1);
    assert_eq!(engine.accumulator(), dt as f64 - 1.0);
    assert_eq!(engine.tick_count(), 1);
}

#[test]
fn invalid_deltas_add_no_time() {
    let mut engine = seeded(8, 8);
    assert_eq!(engine.update(-1.0), 0);
    assert_eq!(engine.update(f32::NAN), 0);
    assert_eq!(engine.update(f32::INFINITY), 0);
    assert_eq!(engine.accumulator(), 0.0);
}

#[test]
fn paused_engine_banks_time_without_ticking() {
    let mut engine = seeded(8, 8);
    let step = engine.settings().fixed_step;
    engine.set_paused(true);
    assert_eq!(engine.update(step * 3.0), 0);
    assert_eq!(engine.tick_count(), 0);

    engine.set_paused(false);
    assert_eq!(engine.update(0.0), 3);
}

#[test]
fn step_once_runs_a_single_tick_while_paused() {
    let mut engine = seeded(8, 8);
    let step = engine.settings().fixed_step;
    engine.set_paused(true);
    engine.request_step_once();

    assert_eq!(engine.update(step * 10.0), 1);
    assert!(!engine.step_once_pending());
    assert_eq!(engine.update(step * 10.0), 0);
}

#[test]
fn step_once_is_consumed_even_without_a_tick() {
    let mut engine = seeded(8, 8);
    let step = engine.settings().fixed_step;
    engine.set_paused(true);
    engine.request_step_once();

    assert_eq!(engine.update(step * 0.1), 0);
    assert!(!engine.step_once_pending());
    assert_eq!(engine.update(step), 0);
}

#[test]
fn parity_alternates_every_tick() {
    let mut engine = seeded(4, 4);
    assert_eq!(engine.parity(), 0);
    engine.tick();
    assert_eq!(engine.parity(), 1);
    engine.tick();
    assert_eq!(engine.parity(), 0);
}

#[test]
fn culled_and_full_sweeps_agree() {
    let mut culled = seeded(96, 80);
    let mut full = seeded(96, 80);
    full.set_tile_culling_enabled(false);

    for engine in [&mut culled, &mut full] {
        busy_scene(engine);
        engine.paint(80, 10, MAT_SAND, 4);
        engine.paint(70, 70, MAT_SMOKE, 3);
    }

    for t in 0..300 {
        culled.tick();
        full.tick();
        assert_eq!(culled.materials(), full.materials(), "diverged at tick {}", t);
    }
    assert_eq!(culled.take_audio_events(), full.take_audio_events());
}

#[test]
fn settled_scene_stops_sweeping() {
    let mut engine = seeded(128, 64);
    engine.enable_perf_metrics(true);
    for x in 0..128 {
        engine.paint(x, 63, MAT_STONE, 0);
    }
    engine.paint(64, 60, MAT_SAND, 0);

    run_ticks(&mut engine, 100);
    assert_eq!(engine.pending_tiles(), 0);

    let step = engine.settings().fixed_step;
    assert_eq!(engine.update(step), 1);
    let stats = engine.perf_stats();
    assert_eq!(stats.ticks(), 1);
    assert_eq!(stats.tiles_swept(), 0);
    assert_eq!(stats.total_tiles(), 8);

    // painting wakes the neighbourhood again
    engine.paint(10, 5, MAT_SAND, 0);
    assert!(engine.pending_tiles() > 0);
}

#[test]
fn fire_consumes_a_wooden_beam() {
    let mut engine = seeded(40, 10);
    for x in 0..40 {
        engine.paint(x, 5, MAT_WOOD, 0);
    }
    engine.take_audio_events();
    engine.paint(0, 4, MAT_FIRE, 0);
    engine.take_audio_events();

    run_ticks(&mut engine, 400);

    assert_eq!(engine.count_material(MAT_WOOD), 0);
    let ignites = engine
        .take_audio_events()
        .into_iter()
        .filter(|e| e.kind == AudioEventKind::Ignite)
        .count();
    assert_eq!(ignites, 40, "one ignite per wooden cell");
}

#[test]
fn refresh_colors_follows_palette() {
    let mut engine = seeded(6, 4);
    engine.paint(1, 1, MAT_SAND, 0);
    engine.paint(4, 3, MAT_WATER, 0);
    let palette = engine.palette_abgr().to_vec();

    let colors = engine.refresh_colors().to_vec();
    assert_eq!(colors.len(), 24);
    assert_eq!(colors[1 * 6 + 1], palette[MAT_SAND as usize]);
    assert_eq!(colors[3 * 6 + 4], palette[MAT_WATER as usize]);
    assert_eq!(colors[0], 0);
}

#[test]
fn extract_rect_materials_is_clamped_and_tightly_packed() {
    let mut engine = seeded(10, 6);
    engine.paint(8, 2, MAT_STONE, 0);
    engine.paint(9, 3, MAT_SAND, 0);

    let out = engine.extract_rect_materials(DirtyRect { x: 7, y: 2, w: 8, h: 2 }).to_vec();
    assert_eq!(out.len(), 3 * 2);
    assert_eq!(out, vec![MAT_EMPTY, MAT_STONE, MAT_EMPTY, MAT_EMPTY, MAT_EMPTY, MAT_SAND]);

    let none = engine.extract_rect_materials(DirtyRect { x: 20, y: 0, w: 4, h: 4 }).len();
    assert_eq!(none, 0);
}

#[test]
fn audio_exports_drain_the_queue() {
    let mut engine = seeded(10, 10);
    engine.paint(1, 2, MAT_SAND, 0);
    engine.paint(3, 4, MAT_SAND, 0);
    assert_eq!(engine.take_audio_events_flat(), vec![1, 1, 2, 1, 3, 4]);
    assert_eq!(engine.pending_audio_events(), 0);

    engine.paint(5, 6, MAT_SAND, 0);
    assert_eq!(engine.take_audio_events_json(), r#"[{"kind":"paint","x":5,"y":6}]"#);
    assert_eq!(engine.take_audio_events_json(), "[]");
}

#[test]
fn clear_empties_and_marks_everything_dirty() {
    let mut engine = seeded(12, 9);
    engine.paint(6, 4, MAT_STONE, 3);
    engine.tick();
    engine.take_dirty_rect();

    engine.clear();
    assert_eq!(engine.non_empty_count(), 0);
    assert_eq!(engine.tick_count(), 0);
    assert_eq!(engine.take_dirty_rect(), Some(DirtyRect { x: 0, y: 0, w: 12, h: 9 }));
}

#[test]
fn settings_json_is_validated_before_applying() {
    let mut engine = seeded(8, 8);
    assert!(engine.load_settings_json(r#"{"fixedStep": -1}"#).is_err());
    assert_eq!(engine.settings().fixed_step, crate::core::settings::DEFAULT_FIXED_STEP);

    engine
        .load_settings_json(r#"{"fixedStep": 0.05, "tileCulling": false}"#)
        .unwrap();
    assert_eq!(engine.settings().fixed_step, 0.05);
    assert!(!engine.tiles.is_enabled());
    assert_eq!(engine.update(0.1), 2);
}

#[test]
fn perf_stats_count_work_when_enabled() {
    let mut engine = seeded(32, 32);
    engine.paint(16, 4, MAT_SAND, 2);
    let step = engine.settings().fixed_step;

    engine.update(step);
    assert_eq!(engine.perf_stats(), PerfStats::default());

    engine.enable_perf_metrics(true);
    engine.update(step * 2.0);
    let stats = engine.perf_stats();
    assert_eq!(stats.ticks(), 2);
    assert!(stats.cells_dispatched() > 0);
    assert!(stats.moves() > 0);
    assert_eq!(stats.grid_size(), 32 * 32);
    assert_eq!(stats.non_empty_cells(), 13);
}

#[test]
fn fire_puffs_smoke_that_rises() {
    let mut engine = Engine::with_settings(
        8,
        40,
        Arc::new(MaterialRegistry::with_defaults()),
        EngineSettings {
            fire_extinguish_chance: 0.0,
            fire_smoke_chance: 1.0,
            ..EngineSettings::seeded(5)
        },
    )
    .unwrap();
    engine.paint(4, 39, MAT_FIRE, 0);

    engine.tick();
    assert_eq!(engine.read(4, 38).material, MAT_SMOKE);

    // the cell above is occupied during this tick, so no new puff yet
    engine.tick();
    assert_eq!(engine.read(4, 37).material, MAT_SMOKE);
    assert_eq!(engine.read(4, 38).material, MAT_EMPTY);

    engine.tick();
    assert_eq!(engine.read(4, 36).material, MAT_SMOKE);
    assert_eq!(engine.read(4, 38).material, MAT_SMOKE);
    assert_eq!(engine.read(4, 39).material, MAT_FIRE);
}

#[test]
#[should_panic(expected = "non-zero")]
fn zero_sized_engine_is_rejected() {
    let _ = Engine::with_default_materials(0, 5);
}
