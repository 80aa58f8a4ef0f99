use aigrowth_common::{PlayerParameters, SharedHazard, SolveMethod, StaticParameters};
use aigrowth_cournot::{SharedHazardGame, SolverConfig};
use aigrowth_model::{calibrate_ubar, StaticModel, Sweep};
use proptest::prelude::*;

fn calibrated_player(gamma: f64, g: f64) -> PlayerParameters {
    PlayerParameters::new(gamma, calibrate_ubar(6.0, 1.0, gamma).unwrap(), 1.0, g)
}

fn single_agent_runtime(player: &PlayerParameters, delta: f64) -> f64 {
    StaticModel::new(StaticParameters::new(
        player.gamma,
        player.ubar,
        player.c0,
        player.g,
        delta,
    ))
    .unwrap()
    .optimal_runtime()
    .unwrap()
    .runtime()
}

proptest! {
    #[test]
    fn prop_no_convexity_decouples_players(
        gamma1 in 1.2..4.0f64,
        gamma2 in 1.2..4.0f64,
        g1 in 0.02..0.20f64,
        g2 in 0.02..0.20f64,
        delta in 0.002..0.03f64,
    ) {
        let players = [calibrated_player(gamma1, g1), calibrated_player(gamma2, g2)];
        let game = SharedHazardGame::new(players, SharedHazard::new(delta, 0.0)).unwrap();
        let state = game.solve().unwrap();

        prop_assert!(state.converged);
        prop_assert_eq!(state.runtimes[0], single_agent_runtime(&players[0], delta));
        prop_assert_eq!(state.runtimes[1], single_agent_runtime(&players[1], delta));
    }

    #[test]
    fn prop_no_convexity_scales_hazard_by_weight(
        gamma1 in 1.2..4.0f64,
        gamma2 in 1.2..4.0f64,
        g1 in 0.02..0.20f64,
        g2 in 0.02..0.20f64,
        omega1 in 0.25..3.0f64,
        omega2 in 0.25..3.0f64,
        delta in 0.002..0.03f64,
    ) {
        // With κ = 0 each player faces the flat hazard δ ω_i
        let players = [
            calibrated_player(gamma1, g1).with_weight(omega1),
            calibrated_player(gamma2, g2).with_weight(omega2),
        ];
        let game = SharedHazardGame::new(players, SharedHazard::new(delta, 0.0)).unwrap();
        let state = game.solve().unwrap();

        prop_assert!(state.converged);
        prop_assert_eq!(state.runtimes[0], single_agent_runtime(&players[0], delta * omega1));
        prop_assert_eq!(state.runtimes[1], single_agent_runtime(&players[1], delta * omega2));
    }

    #[test]
    fn prop_symmetric_paths_agree(
        gamma in 1.2..4.0f64,
        g in 0.06..0.20f64,
        kappa in 0.01..0.4f64,
    ) {
        let game = SharedHazardGame::symmetric(calibrated_player(gamma, g), SharedHazard::new(0.01, kappa))
            .unwrap();
        let iterative = game.solve_iterative().unwrap();
        let symmetric = game.solve_symmetric().unwrap();

        prop_assert!(iterative.converged && symmetric.converged);
        prop_assert!(
            (iterative.runtimes[0] - symmetric.runtimes[0]).abs() < 1e-7,
            "iterative={} symmetric={}", iterative.runtimes[0], symmetric.runtimes[0]
        );
    }
}

#[test]
fn test_benchmark_degeneracy_is_exact() {
    let player = calibrated_player(2.0, 0.10);
    let game = SharedHazardGame::symmetric(player, SharedHazard::new(0.01, 0.0)).unwrap();
    let single = StaticModel::calibrated(1.0, 0.10, 0.01, 2.0, 6.0)
        .unwrap()
        .t_star()
        .unwrap();

    for state in [game.solve_iterative().unwrap(), game.solve_symmetric().unwrap()] {
        assert_eq!(state.runtimes, [single, single]);
        assert!(state.converged);
    }
}

#[test]
fn test_asymmetric_equilibrium() {
    let players = [
        calibrated_player(2.0, 0.10),
        calibrated_player(2.0, 0.11).with_weight(1.5),
    ];
    let game = SharedHazardGame::new(players, SharedHazard::new(0.01, 0.3)).unwrap();
    let state = game.solve().unwrap();

    assert_eq!(state.method, SolveMethod::Iterative);
    assert!(state.converged, "step {}", state.step);
    assert!(state.step < 1e-10);

    // Each runtime is a best response to the other
    for i in 0..2 {
        let response = game.best_response(i, state.runtimes[1 - i]).unwrap();
        assert!(
            (response.runtime - state.runtimes[i]).abs() < 1e-7,
            "player {i}: response {} equilibrium {}",
            response.runtime,
            state.runtimes[i]
        );
    }

    // Strategic interaction shortens both runtimes
    let uncoupled = SharedHazardGame::new(players, SharedHazard::new(0.01, 0.0))
        .unwrap()
        .solve()
        .unwrap();
    assert!(state.runtimes[0] < uncoupled.runtimes[0]);
    assert!(state.runtimes[1] < uncoupled.runtimes[1]);
}

#[test]
fn test_best_response_maximises_payoff() {
    let players = [
        calibrated_player(2.0, 0.10),
        calibrated_player(2.0, 0.11).with_weight(1.5),
    ];
    let game = SharedHazardGame::new(players, SharedHazard::new(0.01, 0.3)).unwrap();
    let rival = 0.4;
    let response = game.best_response(0, rival).unwrap();
    let payoff = |t: f64| game.outcome(t, rival).unwrap()[0].expected_utility;

    let best = payoff(response.runtime);
    for t in [0.0, 0.5 * response.runtime, response.runtime + 0.05, 2.0 * response.runtime] {
        assert!(best >= payoff(t), "T={t} beats the best response");
    }
}

#[test]
fn test_strong_convexity_with_tiny_budget() {
    let config = SolverConfig::default().with_max_iterations(3);
    let players = [
        calibrated_player(2.0, 0.10),
        calibrated_player(2.0, 0.11).with_weight(1.5),
    ];
    let game = SharedHazardGame::new(players, SharedHazard::new(0.01, 0.6))
        .unwrap()
        .with_config(config)
        .unwrap();

    let state = game.solve().unwrap();
    assert!(!state.converged);
    assert_eq!(state.iterations, 3);

    // The default budget is enough
    let state = game.with_config(SolverConfig::default()).unwrap().solve().unwrap();
    assert!(state.converged);
}

#[test]
fn test_kappa_sweep_isolates_points() {
    let game = SharedHazardGame::symmetric(calibrated_player(2.0, 0.10), SharedHazard::new(0.01, 0.0))
        .unwrap();
    let result = game
        .sweep_kappa(&Sweep::new().parallel(), &[0.0, 0.1, -0.2, 0.6])
        .unwrap();
    assert_eq!(result.failure_count(), 1);
    assert!(result.points()[2].error().unwrap().is_domain());
    assert_eq!(result.values(), vec![0.0, 0.1, -0.2, 0.6]);
}
