//! Episode-level behaviour of the cart-pole environment.

use sim::{Action, CartPoleConfig, CartPoleEnv, Environment, Observation, SimError};

#[test]
fn action_indices_round_trip_through_try_from() {
    assert_eq!(Action::try_from(0), Ok(Action::Decrease));
    assert_eq!(Action::try_from(1), Ok(Action::Increase));
    assert_eq!(Action::try_from(2), Err(SimError::InvalidAction(2)));
    assert_eq!(Action::default(), Action::Decrease);
}

#[test]
fn observation_array_layout_matches_gym_order() {
    let obs = Observation::from([0.1, 0.2, 0.3, 0.4]);
    assert_eq!(obs.cart_position, 0.1);
    assert_eq!(obs.cart_velocity, 0.2);
    assert_eq!(obs.pole_angle, 0.3);
    assert_eq!(obs.pole_angular_velocity, 0.4);
    assert_eq!(obs.to_array(), [0.1, 0.2, 0.3, 0.4]);
}

#[test]
fn cart_leaving_the_track_terminates() {
    // Failure angle out of reach so only the track limit can end the episode.
    let config = CartPoleConfig {
        failure_angle: 100.0,
        reset_noise: 0.0,
        ..Default::default()
    };
    let mut env = CartPoleEnv::with_config(config, 3);
    env.reset().unwrap();

    let mut last = None;
    for _ in 0..500 {
        let step = env.step(Action::Decrease).unwrap();
        last = Some(step);
        if step.terminated {
            break;
        }
    }
    let last = last.unwrap();
    assert!(last.terminated);
    assert!(last.observation.cart_position < -2.4);
}

#[test]
fn reset_clears_the_step_counter() {
    let config = CartPoleConfig {
        max_steps: 2,
        reset_noise: 0.0,
        ..Default::default()
    };
    let mut env = CartPoleEnv::with_config(config, 0);
    env.reset().unwrap();
    env.step(Action::Increase).unwrap();
    assert!(env.step(Action::Decrease).unwrap().truncated);

    env.reset().unwrap();
    assert_eq!(env.steps(), 0);
    assert!(!env.step(Action::Increase).unwrap().truncated);
}

#[test]
fn boxed_environment_forwards_calls() {
    let mut env: Box<dyn Environment> = Box::new(CartPoleEnv::new(9));
    let obs = env.reset().unwrap();
    assert!(obs.pole_angle.abs() <= 0.05);
    env.step(Action::Increase).unwrap();
    env.close();
    assert_eq!(env.reset(), Err(SimError::Closed));
}
