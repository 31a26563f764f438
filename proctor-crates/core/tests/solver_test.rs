#![cfg(test)] // workaround for https://github.com/rust-lang/rust-clippy/issues/11024

use std::time::Duration;

use proctor_core::checking::check_solution;
use proctor_core::instance::ExamId;
use proctor_core::instance::InstanceModel;
use proctor_core::instance::RoomId;
use proctor_core::instance::SlotId;
use proctor_core::outputs::Placement;
use proctor_core::outputs::SolveOutcome;
use proctor_core::termination::DecisionBudget;
use proctor_core::termination::Indefinite;
use proctor_core::termination::TimeBudget;
use proctor_core::Solver;
use proctor_core::SolverOptions;
use rand::rngs::SmallRng;
use rand::Rng;
use rand::SeedableRng;

/// An instance in which exam `i` is taken by `enrollments[i]` students of its own.
fn disjoint_exams(enrollments: &[usize], num_slots: usize, capacities: Vec<u32>) -> InstanceModel {
    let mut registrations = vec![];
    for (exam, &enrollment) in enrollments.iter().enumerate() {
        let first = registrations.len();
        registrations.extend((first..first + enrollment).map(|student| (exam, student)));
    }

    InstanceModel::new(
        registrations.len(),
        enrollments.len(),
        num_slots,
        capacities,
        registrations,
    )
    .unwrap()
}

fn random_instance(rng: &mut SmallRng, num_students: usize, num_exams: usize) -> InstanceModel {
    let registrations = (0..num_students)
        .flat_map(|student| {
            let num_registrations = rng.gen_range(1..=2);
            (0..num_registrations)
                .map(|_| (rng.gen_range(0..num_exams), student))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    InstanceModel::new(num_students, num_exams, 12, vec![40, 20, 10], registrations).unwrap()
}

#[test]
fn single_exam_is_placed_in_the_first_slot() {
    let instance = InstanceModel::new(1, 1, 2, vec![5], [(0, 0)]).unwrap();

    let outcome = Solver::default().solve(&instance, &mut Indefinite);

    let SolveOutcome::Solved(solution) = outcome else {
        panic!("expected a schedule, got {outcome:?}");
    };
    assert_eq!(
        solution.assignment.placement(ExamId::new(0)),
        Placement {
            room: RoomId::new(0),
            slot: SlotId::new(0),
        }
    );
    assert_eq!(solution.invigilators.supervisors(ExamId::new(0)).count(), 1);
    assert!(solution.advisory.warnings().is_empty());
}

#[test]
fn exams_sharing_a_student_cannot_fit_in_two_slots() {
    let instance = InstanceModel::new(1, 2, 2, vec![5], [(0, 0), (1, 0)]).unwrap();

    let outcome = Solver::default().solve(&instance, &mut Indefinite);

    assert!(matches!(outcome, SolveOutcome::Infeasible(_)));
    assert!(outcome.solution().is_none());
}

#[test]
fn exams_sharing_a_student_leave_a_slot_free_between_them() {
    let instance = InstanceModel::new(1, 2, 3, vec![5], [(0, 0), (1, 0)]).unwrap();

    let outcome = Solver::default().solve(&instance, &mut Indefinite);

    let solution = outcome.solution().expect("three slots suffice");
    let first = solution.assignment.placement(ExamId::new(0)).slot;
    let second = solution.assignment.placement(ExamId::new(1)).slot;
    assert_eq!(first.distance(second), 2);
}

#[test]
fn large_exam_needs_three_invigilators() {
    let instance = disjoint_exams(&[25], 3, vec![30]);

    let too_small = Solver::with_options(SolverOptions {
        invigilator_pool_size: 2,
    });
    assert!(matches!(
        too_small.solve(&instance, &mut Indefinite),
        SolveOutcome::Infeasible(_)
    ));

    let outcome = Solver::default().solve(&instance, &mut Indefinite);
    let solution = outcome.solution().expect("ten invigilators suffice");
    assert_eq!(solution.invigilators.supervisors(ExamId::new(0)).count(), 3);
}

#[test]
fn total_supervision_demand_is_bounded_by_the_pool() {
    // Seven exams needing three invigilators each, while ten invigilators cover at most twenty
    // duties.
    let instance = disjoint_exams(&[25; 7], 14, vec![30, 30]);

    let outcome = Solver::default().solve(&instance, &mut Indefinite);

    assert!(matches!(outcome, SolveOutcome::Infeasible(_)));
}

#[test]
fn exam_larger_than_every_room_is_infeasible() {
    let instance = disjoint_exams(&[12], 2, vec![10, 5]);

    let outcome = Solver::default().solve(&instance, &mut Indefinite);

    assert!(matches!(outcome, SolveOutcome::Infeasible(_)));
}

#[test]
fn exams_take_the_smallest_sufficient_room() {
    let instance = disjoint_exams(&[8, 3], 4, vec![30, 10, 5]);

    let outcome = Solver::default().solve(&instance, &mut Indefinite);

    let solution = outcome.solution().expect("the rooms suffice");
    assert_eq!(
        solution.assignment.placement(ExamId::new(0)).room,
        RoomId::new(1)
    );
    assert_eq!(
        solution.assignment.placement(ExamId::new(1)).room,
        RoomId::new(2)
    );
}

#[test]
fn exhausted_time_budget_times_out() {
    let mut rng = SmallRng::seed_from_u64(7);
    let instance = random_instance(&mut rng, 300, 40);
    let solver = Solver::with_options(SolverOptions {
        invigilator_pool_size: 100,
    });

    let outcome = solver.solve(&instance, &mut TimeBudget::starting_now(Duration::ZERO));

    assert!(matches!(outcome, SolveOutcome::TimedOut(_)));
    assert_eq!(outcome.summary().statistics.decisions, 0);
}

#[test]
fn short_time_budget_stops_a_long_search() {
    // Fourteen exams sharing one student need twenty-seven slots; proving that twenty-five do not
    // suffice takes the search far longer than the budget.
    let instance =
        InstanceModel::new(1, 14, 25, vec![5], (0..14).map(|exam| (exam, 0))).unwrap();
    let solver = Solver::with_options(SolverOptions {
        invigilator_pool_size: 20,
    });

    let outcome = solver.solve(
        &instance,
        &mut TimeBudget::starting_now(Duration::from_millis(200)),
    );

    assert!(matches!(outcome, SolveOutcome::TimedOut(_)), "{outcome:?}");
    assert!(outcome.summary().statistics.decisions > 0);
}

#[test]
fn exams_in_the_same_slot_have_different_supervisors() {
    let instance =
        InstanceModel::new(4, 4, 2, vec![5, 5], [(0, 0), (1, 1), (2, 2), (3, 3)]).unwrap();

    let outcome = Solver::default().solve(&instance, &mut Indefinite);

    let solution = outcome.solution().expect("two rooms over two slots fit four exams");
    for (first, second) in [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)] {
        let (first, second) = (ExamId::new(first), ExamId::new(second));
        let first_slot = solution.assignment.placement(first).slot;
        if first_slot != solution.assignment.placement(second).slot {
            continue;
        }

        let first_supervisors = solution.invigilators.supervisors(first).collect::<Vec<_>>();
        assert!(solution
            .invigilators
            .supervisors(second)
            .all(|invigilator| !first_supervisors.contains(&invigilator)));
    }
    for (_, roster) in solution.invigilators.rosters() {
        for duty in roster {
            assert!(roster
                .iter()
                .all(|other| other.exam == duty.exam || other.slot != duty.slot));
        }
    }
    assert_eq!(
        check_solution(&instance, &solution.assignment, &solution.invigilators),
        Ok(())
    );
}

#[test]
fn decision_budget_times_out() {
    let instance = disjoint_exams(&[5, 5, 5, 5], 8, vec![10, 10]);

    let outcome = Solver::default().solve(&instance, &mut DecisionBudget::new(3));

    assert!(matches!(outcome, SolveOutcome::TimedOut(_)));
    assert_eq!(outcome.summary().statistics.decisions, 3);
}

#[test]
fn random_instances_yield_valid_schedules() {
    let mut rng = SmallRng::seed_from_u64(42);

    for _ in 0..5 {
        let instance = random_instance(&mut rng, 20, 4);

        let outcome = Solver::default().solve(&instance, &mut Indefinite);

        let solution = outcome.solution().expect("a sparse instance has a schedule");
        assert_eq!(
            check_solution(&instance, &solution.assignment, &solution.invigilators),
            Ok(())
        );
    }
}

#[test]
fn solving_is_deterministic() {
    let mut rng = SmallRng::seed_from_u64(3);
    let instance = random_instance(&mut rng, 20, 5);

    let first = Solver::default().solve(&instance, &mut Indefinite);
    let second = Solver::default().solve(&instance, &mut Indefinite);

    let (first, second) = (first.solution().unwrap(), second.solution().unwrap());
    assert_eq!(first.assignment, second.assignment);
    assert_eq!(first.invigilators, second.invigilators);
    assert_eq!(first.advisory, second.advisory);
}

#[test]
fn independent_solves_run_in_parallel() {
    let mut rng = SmallRng::seed_from_u64(11);
    let instances = (0..4)
        .map(|_| random_instance(&mut rng, 20, 4))
        .collect::<Vec<_>>();

    let sequential = instances
        .iter()
        .map(|instance| Solver::default().solve(instance, &mut Indefinite))
        .collect::<Vec<_>>();

    let parallel = std::thread::scope(|scope| {
        let handles = instances
            .iter()
            .map(|instance| {
                scope.spawn(move || Solver::default().solve(instance, &mut Indefinite))
            })
            .collect::<Vec<_>>();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect::<Vec<_>>()
    });

    for (sequential, parallel) in sequential.iter().zip(&parallel) {
        assert_eq!(
            sequential.solution().map(|solution| &solution.assignment),
            parallel.solution().map(|solution| &solution.assignment)
        );
    }
}
