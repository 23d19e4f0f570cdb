use log::info;
use rubble_collision::*;

/// Damage queue that prints requests instead of applying them.
struct PrintDamage;

impl DamageQueue for PrintDamage {
    fn queue_damage(&self, target: EntityId, amount: u32, source: EntityId) -> CollaboratorResult {
        println!("  damage {amount} -> {target} (from {source})");
        Ok(())
    }
}

fn main() {
    env_logger::init();

    let collaborators = Collaborators::default().with_damage_queue(PrintDamage);
    let mut engine = CollisionEngine::default().with_collaborators(collaborators);

    let materials = [
        TileMaterial::Scaffolding,
        TileMaterial::Wood,
        TileMaterial::Glass,
        TileMaterial::Brick,
        TileMaterial::Steel,
    ];
    for (col, material) in materials.iter().enumerate() {
        engine.spawn(
            EntityBuilder::tile(*material)
                .at(col as f32 * 32.0, 0.0)
                .size(32.0, 16.0),
        );
    }
    engine.spawn(EntityBuilder::wall().at(-16.0, 0.0).size(16.0, 240.0));
    engine.spawn(EntityBuilder::wall().at(160.0, 0.0).size(16.0, 240.0));

    let ball = engine.spawn(
        EntityBuilder::ball()
            .at(40.0, 120.0)
            .size(8.0, 8.0)
            .velocity(90.0, -240.0),
    );

    let dt = 1.0 / 60.0;
    for frame in 0..120 {
        let velocity = engine.velocity(ball).unwrap_or_default();
        if let Some(bounds) = engine.world().entity(ball).and_then(|e| e.bounds) {
            let next = bounds.min + velocity * dt;
            engine.world_mut().set_position(ball, next.x, next.y);
        }

        let metrics = engine.step(frame as f64 * dt as f64);
        for event in engine.events() {
            println!(
                "frame {frame:3}: {:?} {} vs {} normal={:?}",
                event.kind, event.a.id, event.b.id, event.normal
            );
        }
        if metrics.events_dispatched > 0 {
            info!("frame {frame}: {metrics:?}");
        }
    }
}
