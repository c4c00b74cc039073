use super::*;
use crate::gen::{random_bounded_problem, GenCfg, ReplayToken};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

fn v(c: &[f64]) -> Vector {
    Vector::new(c.to_vec()).unwrap()
}

/// `normal·x <= offset`
fn hs(normal: &[f64], offset: f64) -> HalfSpace {
    HalfSpace::new(v(normal), offset).unwrap()
}

fn run_seeded(half_spaces: Vec<HalfSpace>, direction: &[f64], seed: u64) -> Solution {
    let mut rng = StdRng::seed_from_u64(seed);
    solve(half_spaces, v(direction), GeomCfg::default(), &mut rng).unwrap()
}

fn assert_minimum_at(sol: &Solution, expected: &[f64]) {
    match sol {
        Solution::Minimum(p) => {
            assert_eq!(p.dim(), expected.len());
            for (i, e) in expected.iter().enumerate() {
                assert!((p.get(i) - e).abs() < 1e-9, "got {p:?}, expected {expected:?}");
            }
        }
        other => panic!("expected minimum at {expected:?}, got {other:?}"),
    }
}

fn unit_square() -> Vec<HalfSpace> {
    vec![
        hs(&[-1.0, 0.0], 0.0),
        hs(&[1.0, 0.0], 1.0),
        hs(&[0.0, -1.0], 0.0),
        hs(&[0.0, 1.0], 1.0),
    ]
}

fn cube(side: f64) -> Vec<HalfSpace> {
    let mut out = Vec::new();
    for axis in 0..3 {
        let mut e = [0.0; 3];
        e[axis] = 1.0;
        out.push(hs(&e, side));
        e[axis] = -1.0;
        out.push(hs(&e, side));
    }
    out
}

#[test]
fn interval_minimum_and_maximum() {
    for seed in 0..16 {
        // x >= 2, x <= 10
        let c = || vec![hs(&[-1.0], -2.0), hs(&[1.0], 10.0)];
        assert_minimum_at(&run_seeded(c(), &[1.0], seed), &[2.0]);
        assert_minimum_at(&run_seeded(c(), &[-1.0], seed), &[10.0]);
    }
}

#[test]
fn interval_infeasible() {
    for seed in 0..16 {
        // x >= 1, x <= 0
        let sol = run_seeded(vec![hs(&[-1.0], -1.0), hs(&[1.0], 0.0)], &[1.0], seed);
        assert_eq!(sol, Solution::Infeasible);
        assert!(sol.point().is_none());
    }
}

#[test]
fn interval_open_side_settles_on_extreme_bound() {
    for seed in 0..8 {
        // x <= 10, x <= 20, minimize x
        let sol = run_seeded(vec![hs(&[1.0], 10.0), hs(&[1.0], 20.0)], &[1.0], seed);
        assert_minimum_at(&sol, &[10.0]);
        // x <= 5, x <= 3, minimize x
        let sol = run_seeded(vec![hs(&[1.0], 5.0), hs(&[1.0], 3.0)], &[1.0], seed);
        assert_minimum_at(&sol, &[3.0]);
        // x >= -4, x >= 1, maximize x
        let sol = run_seeded(vec![hs(&[-1.0], 4.0), hs(&[-1.0], -1.0)], &[-1.0], seed);
        assert_minimum_at(&sol, &[1.0]);
    }
}

#[test]
fn interval_closing_the_open_side_moves_the_minimum() {
    for seed in 0..16 {
        // x <= 3, x <= 5, then x >= 1: the open side closes at 1
        let sol = run_seeded(
            vec![hs(&[1.0], 3.0), hs(&[1.0], 5.0), hs(&[-1.0], -1.0)],
            &[1.0],
            seed,
        );
        assert_minimum_at(&sol, &[1.0]);
    }
}

#[test]
fn interval_flat_objective_picks_a_feasible_end() {
    let sol = run_seeded(
        vec![hs(&[-1.0], -2.0), hs(&[1.0], 10.0), hs(&[1.0], 7.0)],
        &[0.0],
        3,
    );
    assert_eq!(sol.result_type(), ResultType::Minimum);
    let x = sol.point().unwrap().get(0);
    assert!((2.0 - 1e-9..=7.0 + 1e-9).contains(&x));
}

#[test]
fn single_half_space_is_ambiguous_at_its_representative() {
    let h = hs(&[0.0, -1.0], -1.0);
    let rep = h.plane().point().clone();
    let mut solver = Solver::new(vec![h], v(&[1.0, 1.0])).unwrap();
    assert_eq!(solver.result_type(), None);
    assert_eq!(solver.run_with(&mut StdRng::seed_from_u64(0)), Ok(ResultType::Ambiguous));
    assert_eq!(solver.result_point(), Some(&rep));

    let sol = run_seeded(vec![hs(&[-1.0], -2.0)], &[1.0], 0);
    assert_eq!(sol, Solution::Ambiguous(Point::new(vec![2.0]).unwrap()));
}

#[test]
fn triangle_minimum_at_origin() {
    for seed in 0..32 {
        // x >= 0, y >= 0, x + y <= 1
        let sol = run_seeded(
            vec![hs(&[-1.0, 0.0], 0.0), hs(&[0.0, -1.0], 0.0), hs(&[1.0, 1.0], 1.0)],
            &[1.0, 1.0],
            seed,
        );
        assert_minimum_at(&sol, &[0.0, 0.0]);
    }
}

#[test]
fn infeasible_strip_in_the_plane() {
    for seed in 0..32 {
        // x >= 1, x <= 0, y >= 0
        let sol = run_seeded(
            vec![hs(&[-1.0, 0.0], -1.0), hs(&[1.0, 0.0], 0.0), hs(&[0.0, -1.0], 0.0)],
            &[1.0, 1.0],
            seed,
        );
        assert_eq!(sol, Solution::Infeasible);
    }
}

#[test]
fn square_corners_follow_the_direction() {
    for seed in 0..16 {
        assert_minimum_at(&run_seeded(unit_square(), &[-1.0, -2.0], seed), &[1.0, 1.0]);
        assert_minimum_at(&run_seeded(unit_square(), &[3.0, -0.5], seed), &[0.0, 1.0]);
    }
}

#[test]
fn optimal_edge_gives_a_point_on_it() {
    for seed in 0..16 {
        let sol = run_seeded(unit_square(), &[0.0, 1.0], seed);
        assert_eq!(sol.result_type(), ResultType::Minimum);
        let p = sol.point().unwrap();
        assert!(p.get(1).abs() < 1e-9);
        assert!((-1e-9..=1.0 + 1e-9).contains(&p.get(0)));
    }
}

#[test]
fn cube_and_simplex_in_three_dimensions() {
    for seed in 0..16 {
        assert_minimum_at(&run_seeded(cube(1.0), &[1.0, 1.0, 1.0], seed), &[-1.0, -1.0, -1.0]);
        assert_minimum_at(&run_seeded(cube(2.0), &[1.0, -2.0, 0.5], seed), &[-2.0, 2.0, -2.0]);
        let simplex = vec![
            hs(&[-1.0, 0.0, 0.0], 0.0),
            hs(&[0.0, -1.0, 0.0], 0.0),
            hs(&[0.0, 0.0, -1.0], 0.0),
            hs(&[1.0, 1.0, 1.0], 1.0),
        ];
        assert_minimum_at(&run_seeded(simplex, &[-1.0, -2.0, -3.0], seed), &[0.0, 0.0, 1.0]);
    }
}

#[test]
fn infeasible_in_three_dimensions() {
    for seed in 0..16 {
        let mut c = cube(1.0);
        // x + y + z >= 4 is outside the unit cube
        c.push(hs(&[-1.0, -1.0, -1.0], -4.0));
        assert_eq!(run_seeded(c, &[0.0, 1.0, 0.0], seed), Solution::Infeasible);
    }
}

#[test]
fn redundant_and_duplicate_bounds() {
    for seed in 0..16 {
        let mut c = unit_square();
        c.extend(unit_square());
        c.push(hs(&[1.0, 1.0], 5.0));
        c.push(hs(&[-1.0, -1.0], 3.0));
        assert_minimum_at(&run_seeded(c, &[1.0, 1.0], seed), &[0.0, 0.0]);
    }
}

#[test]
fn unbounded_objective_settles_on_best_vertex() {
    for seed in 0..16 {
        // y >= 0, x <= 5, minimize x + y: unbounded, best vertex (5, 0)
        let sol = run_seeded(vec![hs(&[0.0, -1.0], 0.0), hs(&[1.0, 0.0], 5.0)], &[1.0, 1.0], seed);
        assert_minimum_at(&sol, &[5.0, 0.0]);
    }
}

#[test]
fn unbounded_without_vertices_stays_ambiguous() {
    for seed in 0..16 {
        // y >= 0, y >= 1, minimize x
        let c = vec![hs(&[0.0, -1.0], 0.0), hs(&[0.0, -1.0], -1.0)];
        let sol = run_seeded(c.clone(), &[1.0, 0.0], seed);
        assert_eq!(sol.result_type(), ResultType::Ambiguous);
        let p = sol.point().unwrap();
        assert!(c.iter().all(|h| h.contains(p)));
    }
}

#[test]
fn flat_objective_returns_a_feasible_point() {
    let c = unit_square();
    let sol = run_seeded(c.clone(), &[0.0, 0.0], 5);
    assert_eq!(sol.result_type(), ResultType::Minimum);
    let p = sol.point().unwrap();
    assert!(c.iter().all(|h| h.contains(p)));
}

#[test]
fn construction_errors() {
    assert_eq!(
        Solver::new(Vec::new(), v(&[1.0])).err(),
        Some(SolverError::EmptyConstraintSet)
    );
    assert_eq!(
        Solver::new(vec![hs(&[1.0, 0.0], 1.0), hs(&[1.0, 0.0, 0.0], 1.0)], v(&[1.0, 1.0])).err(),
        Some(SolverError::DimensionMismatch {
            index: 1,
            expected: 2,
            found: 3
        })
    );
}

#[test]
fn non_finite_direction_is_rejected() {
    for bad in [f64::NAN, f64::INFINITY] {
        let direction = v(&[1.0, bad]);
        assert_eq!(
            Solver::new(unit_square(), direction).err(),
            Some(SolverError::NonFiniteDirection)
        );
    }
}

#[test]
fn second_run_is_rejected() {
    let mut solver = Solver::new(unit_square(), v(&[1.0, 1.0])).unwrap();
    assert_eq!(solver.run(), Ok(ResultType::Minimum));
    assert_eq!(solver.run(), Err(SolverError::AlreadyRun));
    assert!(solver.result_point().is_some());
}

#[test]
fn tolerance_is_configurable() {
    // x >= 1, x <= 1 - 1e-6: empty by default, feasible with a loose tolerance
    let c = || vec![hs(&[-1.0], -1.0), hs(&[1.0], 1.0 - 1e-6)];
    assert_eq!(run_seeded(c(), &[1.0], 0), Solution::Infeasible);
    let loose = GeomCfg {
        eps_feas: 1e-3,
        ..GeomCfg::default()
    };
    let sol = solve(c(), v(&[1.0]), loose, &mut StdRng::seed_from_u64(0)).unwrap();
    assert_eq!(sol.result_type(), ResultType::Minimum);
}

/// Objective value of the best feasible vertex, by brute force.
fn brute_force_value(half_spaces: &[HalfSpace], direction: &Vector) -> f64 {
    let v = vertices::best_vertex(half_spaces, direction, &GeomCfg::default())
        .expect("bounded instance has a vertex");
    direction.eval(&v)
}

fn problem_strategy() -> impl Strategy<Value = (usize, usize, u64)> {
    (2usize..=4, 3usize..=8, any::<u64>())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn matches_vertex_enumeration((dim, count, seed) in problem_strategy()) {
        let cfg = GenCfg { dim, count, ..GenCfg::default() };
        let problem = random_bounded_problem(cfg, ReplayToken { seed, index: 0 }).unwrap();
        let expected = brute_force_value(&problem.half_spaces, &problem.direction);
        let sol = solve(
            problem.half_spaces.clone(),
            problem.direction.clone(),
            GeomCfg::default(),
            &mut StdRng::seed_from_u64(seed),
        )
        .unwrap();
        prop_assert_eq!(sol.result_type(), ResultType::Minimum);
        let p = sol.point().unwrap();
        for h in &problem.half_spaces {
            prop_assert!(h.contains_eps(p, 1e-7));
        }
        prop_assert!((problem.direction.eval(p) - expected).abs() < 1e-6);
    }

    #[test]
    fn order_and_seed_do_not_change_the_result(
        (dim, count, seed) in problem_strategy(),
        shuffle_seed in any::<u64>(),
    ) {
        let cfg = GenCfg { dim, count, ..GenCfg::default() };
        let problem = random_bounded_problem(cfg, ReplayToken { seed, index: 1 }).unwrap();
        let mut shuffled = problem.half_spaces.clone();
        shuffled.shuffle(&mut StdRng::seed_from_u64(shuffle_seed));

        let a = solve(
            problem.half_spaces.clone(),
            problem.direction.clone(),
            GeomCfg::default(),
            &mut StdRng::seed_from_u64(seed),
        )
        .unwrap();
        let b = solve(
            shuffled,
            problem.direction.clone(),
            GeomCfg::default(),
            &mut StdRng::seed_from_u64(shuffle_seed.wrapping_add(1)),
        )
        .unwrap();
        prop_assert_eq!(a.result_type(), b.result_type());
        let (pa, pb) = (a.point().unwrap(), b.point().unwrap());
        prop_assert!(pa.distance(pb) < 1e-6, "{:?} vs {:?}", pa, pb);
    }

    #[test]
    fn lifted_points_satisfy_the_plane(
        n in prop::collection::vec(-3.0f64..3.0, 3),
        d in -5.0f64..5.0,
        q in prop::collection::vec(-10.0f64..10.0, 2),
    ) {
        prop_assume!(n.iter().map(|x| x * x).sum::<f64>() > 1e-3);
        let plane = Plane::new(Vector::new(n).unwrap(), d).unwrap();
        let frame = Frame::new(plane).unwrap();
        let lifted = frame.lift(&Point::new(q).unwrap());
        prop_assert!(frame.plane().signed_distance(&lifted).abs() < 1e-9);
    }
}
