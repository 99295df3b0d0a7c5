use battle_core::{
    Battle, BattleConfig, BattleEvent, CombatantId, CombatantSpec, DamageType, EventKind, Side,
    StatKind, UltimateOutcome,
};

/// Zero defense and no crits, so damage numbers are exact.
fn flat(name: &str, side: Side) -> CombatantSpec {
    CombatantSpec::new(name, side)
        .with_stat(StatKind::Defense, 0.0)
        .with_stat(StatKind::CritRate, 0.0)
}

/// A battle where ultimates are always charged.
fn battle() -> Battle {
    Battle::new(BattleConfig::default().with_ultimate_charge_max(0), 42)
}

fn hp(battle: &Battle, id: CombatantId) -> u32 {
    battle.combatant(id).map_or(0, |c| c.hp())
}

fn count(battle: &Battle, kind: EventKind) -> usize {
    battle.events().iter().filter(|e| e.kind() == kind).count()
}

#[test]
fn fire_scales_with_missing_hp_and_drain_stacks() {
    let mut battle = battle();
    let pyro = battle.spawn(flat("Pyro", Side::Party).with_damage_type(DamageType::Fire));
    let dummy = battle.spawn(flat("Dummy", Side::Foes).with_stat(StatKind::MaxHp, 10_000.0));
    if let Some(c) = battle.combatant_mut(pyro) {
        c.set_hp(500);
    }

    assert_eq!(battle.apply_damage(dummy, 100.0, Some(pyro), Some("attack")), 150);

    battle.context_mut().add_fire_drain_stack(pyro);
    let boosted = (150.0 * 5.0_f64.sqrt()) as u32;
    assert_eq!(battle.apply_damage(dummy, 100.0, Some(pyro), Some("attack")), boosted);
}

#[test]
fn fire_ultimate_ignites_and_burns_the_caster() {
    let mut battle = battle();
    let pyro = battle.spawn(flat("Pyro", Side::Party).with_damage_type(DamageType::Fire));
    let a = battle.spawn(flat("A", Side::Foes));
    let b = battle.spawn(flat("B", Side::Foes));
    battle.start().expect("start");

    assert_eq!(battle.use_ultimate(pyro), Ok(UltimateOutcome::Completed));
    assert_eq!(battle.context().fire_drain_stacks(pyro), 1);
    for foe in [a, b] {
        assert_eq!(hp(&battle, foe), 900);
        assert_eq!(battle.combatant(foe).map(|c| c.dot_count()), Some(1));
    }

    battle.begin_turn(pyro).expect("turn");
    assert_eq!(hp(&battle, pyro), 950);
}

#[test]
fn ice_ultimate_ramps_per_target() {
    let mut battle = battle();
    let cryo = battle.spawn(flat("Cryo", Side::Party).with_damage_type(DamageType::Ice));
    let foes: Vec<_> = (0..4)
        .map(|i| battle.spawn(flat(&format!("Foe{i}"), Side::Foes)))
        .collect();
    battle.start().expect("start");

    assert_eq!(battle.use_ultimate(cryo), Ok(UltimateOutcome::Completed));

    let taken: Vec<u32> = foes.iter().map(|&f| 1000 - hp(&battle, f)).collect();
    assert_eq!(taken, vec![100, 130, 169, 219]);
}

#[test]
fn ice_ultimate_skips_the_fallen() {
    let mut battle = battle();
    let cryo = battle.spawn(flat("Cryo", Side::Party).with_damage_type(DamageType::Ice));
    let down = battle.spawn(flat("Down", Side::Foes));
    let up = battle.spawn(flat("Up", Side::Foes));
    if let Some(c) = battle.combatant_mut(down) {
        c.set_hp(0);
    }
    battle.start().expect("start");

    battle.use_ultimate(cryo).expect("ultimate");
    assert_eq!(hp(&battle, up), 900);
}

#[test]
fn wind_attack_spreads_to_registered_foes() {
    let mut battle = battle();
    let aero = battle.spawn(flat("Aero", Side::Party).with_damage_type(DamageType::Wind));
    let main = battle.spawn(flat("Main", Side::Foes));
    let side_a = battle.spawn(flat("SideA", Side::Foes));
    let side_b = battle.spawn(flat("SideB", Side::Foes));
    battle.start().expect("start");

    let report = battle.take_action(aero, Some(main)).expect("action");
    assert_eq!(report.damage, 150);
    assert_eq!(hp(&battle, main), 900);
    assert_eq!(hp(&battle, side_a), 975);
    assert_eq!(hp(&battle, side_b), 975);
    assert!(battle.context().wind().get(aero).is_some());

    battle.end_turn(aero).expect("turn end");
    assert!(battle.context().wind().is_empty());
}

#[test]
fn wind_ultimate_honours_hit_override() {
    let mut battle = battle();
    let aero = battle.spawn(
        flat("Aero", Side::Party)
            .with_damage_type(DamageType::Wind)
            .with_ultimate_hits(4),
    );
    let a = battle.spawn(flat("A", Side::Foes));
    let b = battle.spawn(flat("B", Side::Foes));
    battle.start().expect("start");

    assert_eq!(battle.use_ultimate(aero), Ok(UltimateOutcome::Completed));
    assert_eq!(hp(&battle, a), 950);
    assert_eq!(hp(&battle, b), 950);
    let hits = battle
        .events()
        .iter()
        .filter(|e| matches!(e, BattleEvent::HitLanded { attacker, .. } if *attacker == aero))
        .count();
    assert_eq!(hits, 4);
    assert!(
        battle
            .combatant(aero)
            .is_some_and(|c| c.active_effects().is_empty())
    );
}

#[test]
fn lightning_ultimate_stacks_shocks() {
    let mut battle = battle();
    let volt = battle.spawn(flat("Volt", Side::Party).with_damage_type(DamageType::Lightning));
    let foe = battle.spawn(flat("Foe", Side::Foes));
    battle.start().expect("start");

    battle.use_ultimate(volt).expect("first");
    assert_eq!(hp(&battle, foe), 900);
    battle.use_ultimate(volt).expect("second");
    assert_eq!(hp(&battle, foe), 790);

    let resistance = battle.combatant(foe).map_or(0.0, |c| c.effect_resistance());
    assert!((resistance + 0.10).abs() < 1e-9);
}

#[test]
fn light_action_rescues_a_critical_ally() {
    let mut battle = battle();
    let cleric = battle.spawn(flat("Cleric", Side::Party).with_damage_type(DamageType::Light));
    let ward = battle.spawn(flat("Ward", Side::Party));
    let foe = battle.spawn(flat("Foe", Side::Foes));
    if let Some(c) = battle.combatant_mut(ward) {
        c.set_hp(200);
    }
    battle.start().expect("start");

    let report = battle.take_action(cleric, Some(foe)).expect("action");
    assert!(!report.proceeded);
    assert_eq!(hp(&battle, foe), 1000);
    assert_eq!(hp(&battle, ward), 300);
    for ally in [cleric, ward] {
        let hots = battle
            .combatant(ally)
            .and_then(|c| c.effect_manager())
            .map_or(0, |m| m.hot_count());
        assert_eq!(hots, 1);
    }
}

#[test]
fn light_ultimate_cleanses_heals_and_exposes() {
    let mut battle = battle();
    let cleric = battle.spawn(flat("Cleric", Side::Party).with_damage_type(DamageType::Light));
    let ward = battle.spawn(flat("Ward", Side::Party));
    let foe = battle.spawn(CombatantSpec::new("Foe", Side::Foes).with_damage_type(DamageType::Fire));
    battle.start().expect("start");

    battle.apply_damage(ward, 600.0, None, None);
    assert!(battle.maybe_inflict_dot(ward, foe, 100.0, None));

    assert_eq!(battle.use_ultimate(cleric), Ok(UltimateOutcome::Completed));
    assert_eq!(hp(&battle, ward), 1000);
    assert_eq!(battle.combatant(ward).map(|c| c.dot_count()), Some(0));
    assert_eq!(battle.combatant(foe).map(|c| c.defense()), Some(37.5));
    assert_eq!(count(&battle, EventKind::LightUltimate), 1);
}

#[test]
fn dark_action_drains_the_party() {
    let mut battle = battle();
    let warlock = battle.spawn(
        flat("Warlock", Side::Party)
            .with_damage_type(DamageType::Dark)
            .with_stat(StatKind::MaxHp, 100.0),
    );
    let frail = battle.spawn(flat("Frail", Side::Party));
    let healthy = battle.spawn(flat("Healthy", Side::Party));
    let foe = battle.spawn(flat("Foe", Side::Foes));
    if let Some(c) = battle.combatant_mut(frail) {
        c.set_hp(1);
    }
    if let Some(c) = battle.combatant_mut(healthy) {
        c.set_hp(500);
    }
    battle.start().expect("start");

    battle.take_action(warlock, Some(foe)).expect("action");
    assert_eq!(hp(&battle, warlock), 90);
    assert_eq!(hp(&battle, frail), 1);
    assert_eq!(hp(&battle, healthy), 450);

    let bonus = battle.context().dark_bonus(warlock).expect("bonus stored");
    let drained = 60.0 * 0.0001;
    assert!(bonus >= 1.0 + drained * 0.99 && bonus <= 1.0 + drained * 1.01);
}

#[test]
fn dark_ultimate_focuses_one_target() {
    let mut battle = battle();
    let warlock = battle.spawn(flat("Warlock", Side::Party).with_damage_type(DamageType::Dark));
    let first = battle.spawn(flat("First", Side::Foes));
    let second = battle.spawn(flat("Second", Side::Foes));
    battle.start().expect("start");

    assert_eq!(battle.use_ultimate(warlock), Ok(UltimateOutcome::Completed));
    assert_eq!(hp(&battle, first), 400);
    assert_eq!(hp(&battle, second), 1000);
    assert_eq!(count(&battle, EventKind::Damage), 6);
}

#[test]
fn dark_ultimate_feeds_on_party_dots() {
    let mut battle = battle();
    let warlock = battle.spawn(flat("Warlock", Side::Party).with_damage_type(DamageType::Dark));
    let foe = battle.spawn(
        flat("Foe", Side::Foes)
            .with_damage_type(DamageType::Fire)
            .with_stat(StatKind::MaxHp, 100_000.0),
    );
    battle.start().expect("start");
    battle.maybe_inflict_dot(warlock, foe, 100.0, None);

    battle.use_ultimate(warlock).expect("ultimate");
    assert_eq!(hp(&battle, foe), 100_000 - 6 * 175);
}

#[test]
fn generic_ultimate_is_a_focused_flurry() {
    let mut battle = battle();
    let brawler = battle.spawn(flat("Brawler", Side::Party));
    let foe = battle.spawn(flat("Foe", Side::Foes));
    battle.start().expect("start");

    assert_eq!(battle.use_ultimate(brawler), Ok(UltimateOutcome::Completed));
    assert_eq!(hp(&battle, foe), 1000 - 64);
    assert_eq!(count(&battle, EventKind::ActionTaken), 64);
}

#[test]
fn ultimate_is_interrupted_when_every_foe_falls() {
    let mut battle = battle();
    let brawler = battle.spawn(flat("Brawler", Side::Party).with_stat(StatKind::Atk, 6_400.0));
    let foe = battle.spawn(flat("Foe", Side::Foes).with_stat(StatKind::MaxHp, 250.0));
    battle.start().expect("start");

    let outcome = battle.use_ultimate(brawler).expect("ultimate");
    assert_eq!(outcome, UltimateOutcome::Interrupted { hits_landed: 3 });
    assert!(!battle.is_alive(foe));
    assert_eq!(count(&battle, EventKind::UltimateCompleted), 1);
}

#[test]
fn ultimate_without_enemies_fails() {
    let mut battle = battle();
    let lonely = battle.spawn(flat("Lonely", Side::Party).with_damage_type(DamageType::Ice));
    battle.start().expect("start");

    assert_eq!(battle.use_ultimate(lonely), Ok(UltimateOutcome::Failed));
    assert_eq!(count(&battle, EventKind::UltimateFailed), 1);
}

#[test]
fn light_ultimate_recast_keeps_the_same_shred() {
    let mut battle = battle();
    let cleric = battle.spawn(flat("Cleric", Side::Party).with_damage_type(DamageType::Light));
    let foe = battle.spawn(flat("Foe", Side::Foes).with_stat(StatKind::Defense, 100.0));
    battle.start().expect("start");

    battle.use_ultimate(cleric).expect("first");
    assert_eq!(battle.combatant(foe).map(|c| c.defense()), Some(75.0));
    battle.use_ultimate(cleric).expect("second");
    assert_eq!(battle.combatant(foe).map(|c| c.defense()), Some(75.0));
}

#[test]
fn light_ultimate_heals_to_full_regardless_of_vitality() {
    let mut battle = battle();
    let cleric = battle.spawn(flat("Cleric", Side::Party).with_damage_type(DamageType::Light));
    let frail = battle.spawn(flat("Frail", Side::Party).with_stat(StatKind::Vitality, 0.5));
    battle.spawn(flat("Foe", Side::Foes));
    if let Some(c) = battle.combatant_mut(frail) {
        c.set_hp(400);
    }
    battle.start().expect("start");

    assert_eq!(battle.use_ultimate(cleric), Ok(UltimateOutcome::Completed));
    assert_eq!(hp(&battle, frail), 1000);
}

#[test]
fn focused_ultimate_stops_when_its_target_falls() {
    let mut battle = battle();
    let brawler = battle.spawn(flat("Brawler", Side::Party).with_stat(StatKind::Atk, 6_400.0));
    let first = battle.spawn(flat("First", Side::Foes).with_stat(StatKind::MaxHp, 250.0));
    let second = battle.spawn(flat("Second", Side::Foes));
    battle.start().expect("start");

    let outcome = battle.use_ultimate(brawler).expect("ultimate");
    assert_eq!(outcome, UltimateOutcome::Interrupted { hits_landed: 3 });
    assert!(!battle.is_alive(first));
    assert_eq!(hp(&battle, second), 1000);
}

#[test]
fn dark_dot_ticks_carry_the_pending_bonus() {
    let mut battle = battle();
    let warlock = battle.spawn(flat("Warlock", Side::Party).with_damage_type(DamageType::Dark));
    let foe = battle.spawn(flat("Foe", Side::Foes).with_stat(StatKind::MaxHp, 100_000.0));
    battle.start().expect("start");

    battle.maybe_inflict_dot(foe, warlock, 1_000.0, None);
    battle.context_mut().set_dark_bonus(warlock, 2.0);
    assert_eq!(battle.tick_effects(foe).damage, 800);
}
