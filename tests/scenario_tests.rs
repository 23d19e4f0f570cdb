use rubble_collision::*;

fn recording_engine() -> (CollisionEngine, RecordingCollaborator) {
    let recorder = RecordingCollaborator::new();
    let engine = CollisionEngine::default().with_collaborators(Collaborators::recording(&recorder));
    (engine, recorder)
}

#[test]
fn ball_hitting_scaffolding_bounces_and_damages_tile() {
    let (mut engine, recorder) = recording_engine();
    let ball = engine.spawn(
        EntityBuilder::ball()
            .at(100.0, 100.0)
            .size(16.0, 16.0)
            .velocity(0.0, 200.0),
    );
    let tile = engine.spawn(
        EntityBuilder::tile(TileMaterial::Scaffolding)
            .at(100.0, 116.0)
            .size(32.0, 32.0),
    );

    let metrics = engine.step(0.016);

    assert_eq!(engine.events().len(), 1);
    let event = engine.events()[0];
    assert_eq!(event.kind, CollisionEventKind::BallTileHit);
    assert_eq!(event.a.id, ball);
    assert_eq!(event.b.id, tile);
    assert!(engine.velocity(ball).unwrap().y < 0.0);
    assert_eq!(recorder.damage_requests(), vec![(tile, 1, ball)]);
    assert_eq!(metrics.events_dispatched, 1);
    assert_eq!(
        recorder.audio_cues(),
        vec![TileMaterial::Scaffolding.destruction_cue().to_string()]
    );
}

#[test]
fn player_within_tolerance_of_tile_top_is_grounded() {
    let (mut engine, _recorder) = recording_engine();
    // Bottom edge at 122, tile top at 120.
    let player = engine.spawn(EntityBuilder::player().at(100.0, 90.0).size(24.0, 32.0));
    engine.spawn(
        EntityBuilder::tile(TileMaterial::Brick)
            .at(96.0, 120.0)
            .size(32.0, 32.0),
    );

    engine.step(0.0);

    assert_eq!(engine.events().len(), 1);
    assert_eq!(engine.events()[0].kind, CollisionEventKind::PlayerGroundContact);
    let state = engine.world().motion(player).unwrap().player_state().unwrap();
    assert!(state.grounded);
}

#[test]
fn far_apart_bodies_are_never_tested() {
    let mut engine = CollisionEngine::default();
    engine.spawn(EntityBuilder::ball().at(0.0, 0.0).size(16.0, 16.0));
    engine.spawn(EntityBuilder::wall().at(1000.0, 0.0).size(16.0, 16.0));

    let metrics = engine.step(0.0);

    assert_eq!(engine.manager().config().cell_size, 64.0);
    assert_eq!(metrics.checks_attempted, 0);
    assert_eq!(metrics.checks_executed, 0);
    assert!(engine.events().is_empty());
}

#[test]
fn hazard_kills_player_regardless_of_velocity() {
    for velocity in [0.0, 15.0, -400.0] {
        let (mut engine, recorder) = recording_engine();
        let player = engine.spawn(
            EntityBuilder::player()
                .at(0.0, 0.0)
                .size(16.0, 16.0)
                .velocity(0.0, velocity),
        );
        engine.spawn(EntityBuilder::hazard().at(4.0, 10.0).size(16.0, 8.0));

        engine.step(1.0);

        assert_eq!(engine.events()[0].kind, CollisionEventKind::PlayerHazardContact);
        let state = engine.world().motion(player).unwrap().player_state().unwrap();
        assert_eq!(state.life, LifeState::Dead);
        assert!(recorder.audio_cues().contains(&"player_death".to_string()));
    }
}
