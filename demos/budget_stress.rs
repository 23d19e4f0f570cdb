use rubble_collision::*;

fn main() {
    env_logger::init();

    let config = CollisionConfig::default().with_check_budget(256);
    let mut engine = match CollisionEngine::new(config) {
        Ok(engine) => engine,
        Err(err) => {
            eprintln!("invalid config: {err}");
            return;
        }
    };

    engine.spawn(EntityBuilder::wall().at(0.0, 248.0).size(512.0, 16.0));
    for i in 0..2000u32 {
        let x = (i * 31 % 500) as f32;
        let y = (i * 17 % 240) as f32;
        engine.spawn(EntityBuilder::ball().at(x, y).size(6.0, 6.0).velocity(0.0, 120.0));
        if i % 4 == 0 {
            engine.spawn(EntityBuilder::tile(TileMaterial::Glass).at(x, y + 4.0).size(12.0, 12.0));
        }
    }

    for budget in [64, 256, 1024, 8192] {
        engine.set_check_budget(budget);
        let metrics = engine.step(0.0);
        println!(
            "ceiling {:5}: attempted {:6} executed {:5} collisions {:5} exhausted {} ({:.3} ms)",
            metrics.check_ceiling,
            metrics.checks_attempted,
            metrics.checks_executed,
            metrics.collisions_found,
            metrics.budget_exhausted,
            engine.manager().profiler().total_pass_time.as_secs_f64() * 1000.0,
        );
    }
}
