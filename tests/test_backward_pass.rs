// Backpropagation checked against hand-computed single steps: error and
// delta terms, the momentum update, the bias-delta convention, and shape
// validation.

use stratum_nn::{Activation, Network, NetworkError, Trainer};

const TOL: f64 = 1e-12;

#[test]
fn single_step_weight_update_matches_hand_computation() {
    let mut network = Network::new(Activation::Sigmoid, false, &[1, 1]);
    network.layers[0].neurons[0].weights[0] = 0.5;
    let out = network.evaluate(&[1.0]).unwrap()[0];

    let trainer = Trainer::new(0.5, 0.0);
    trainer.train(&mut network, &[1.0]).unwrap();

    let error = 1.0 - out;
    let delta = error * (out * (1.0 - out));
    let step = 0.5 * (1.0 * delta);

    let output_neuron = &network.layers[1].neurons[0];
    assert!((output_neuron.error - error).abs() < TOL);
    assert!((output_neuron.delta - delta).abs() < TOL);

    let input_neuron = &network.layers[0].neurons[0];
    assert!((input_neuron.weights[0] - (0.5 + step)).abs() < TOL);
    assert!((input_neuron.previous_weight_deltas[0] - step).abs() < TOL);
}

#[test]
fn momentum_adds_a_fraction_of_the_previous_update() {
    let mut network = Network::new(Activation::Sigmoid, false, &[1, 1]);
    network.layers[0].neurons[0].weights[0] = 0.2;
    let trainer = Trainer::new(0.5, 0.9);

    let out1 = network.evaluate(&[1.0]).unwrap()[0];
    trainer.train(&mut network, &[1.0]).unwrap();
    let delta1 = (1.0 - out1) * (out1 * (1.0 - out1));
    let step1 = 0.5 * (1.0 * delta1);
    let w1 = 0.2 + step1;
    assert!((network.layers[0].neurons[0].weights[0] - w1).abs() < TOL);

    let out2 = network.evaluate(&[1.0]).unwrap()[0];
    trainer.train(&mut network, &[1.0]).unwrap();
    let delta2 = (1.0 - out2) * (out2 * (1.0 - out2));
    let step2 = 0.5 * (1.0 * delta2) + 0.9 * step1;
    let w2 = w1 + step2;
    assert!((network.layers[0].neurons[0].weights[0] - w2).abs() < TOL);
    assert!((network.layers[0].neurons[0].previous_weight_deltas[0] - step2).abs() < TOL);
}

#[test]
fn hidden_deltas_use_pre_update_weights() {
    let act = Activation::Sigmoid;
    let mut network = Network::new(act, false, &[1, 1, 1]);
    network.layers[0].neurons[0].weights[0] = 0.4;
    network.layers[1].neurons[0].weights[0] = -0.6;
    let out = network.evaluate(&[0.8]).unwrap()[0];
    let hidden = network.layers[1].neurons[0].value;

    let trainer = Trainer::new(0.3, 0.0);
    trainer.train(&mut network, &[0.0]).unwrap();

    let out_delta = (0.0 - out) * act.derivative(out);
    let hidden_delta = act.derivative(hidden) * (-0.6 * out_delta);
    assert!((network.layers[1].neurons[0].delta - hidden_delta).abs() < TOL);

    // the hidden-to-output weight update uses the hidden value and output delta
    let w12 = -0.6 + 0.3 * (hidden * out_delta);
    assert!((network.layers[1].neurons[0].weights[0] - w12).abs() < TOL);
    // the input-to-hidden update uses the input value and the hidden delta
    let w01 = 0.4 + 0.3 * (0.8 * hidden_delta);
    assert!((network.layers[0].neurons[0].weights[0] - w01).abs() < TOL);
}

#[test]
fn bias_deltas_collapse_to_zero_for_sigmoid() {
    let mut network = Network::new(Activation::Sigmoid, true, &[2, 2, 1]);
    network.randomize_weights(11, 0.5);
    // give the bias weights something to sum over
    network.layers[0].bias_neuron.weights = vec![0.3, -0.2];
    network.layers[1].bias_neuron.weights = vec![0.4];

    network.evaluate(&[1.0, 0.0]).unwrap();
    let trainer = Trainer::new(0.7, 0.3);
    trainer.train(&mut network, &[1.0]).unwrap();

    // the bias value term is derivative(1.0), which is 0 for sigmoid
    assert_eq!(network.layers[0].bias_neuron.delta, 0.0);
    assert_eq!(network.layers[1].bias_neuron.delta, 0.0);
}

fn identity(x: f64) -> f64 {
    x
}

fn two(_y: f64) -> f64 {
    2.0
}

#[test]
fn bias_delta_convention_feeds_the_literal_one() {
    let act = Activation::Custom {
        function: identity,
        derivative: two,
    };
    let mut network = Network::new(act, true, &[1, 1]);
    network.layers[0].neurons[0].weights[0] = 0.5;
    network.layers[0].bias_neuron.weights[0] = 0.25;
    network.evaluate(&[2.0]).unwrap();

    // learning rate 0 isolates the delta computation from weight updates
    let trainer = Trainer::new(0.0, 0.0);
    trainer.train(&mut network, &[3.0]).unwrap();

    // output = 0.25 + 0.5 * 2 = 1.25; error = 1.75; delta = 1.75 * 2 = 3.5
    assert!((network.layers[1].neurons[0].delta - 3.5).abs() < TOL);
    // bias delta = derivative(1.0) * (0.25 * 3.5) = 2 * 0.875 = 1.75
    assert!((network.layers[0].bias_neuron.delta - 1.75).abs() < TOL);
}

#[test]
fn wrong_target_length_is_rejected_before_any_mutation() {
    let mut network = Network::new(Activation::Sigmoid, true, &[2, 1]);
    network.randomize_weights(5, 0.5);
    network.evaluate(&[0.3, 0.7]).unwrap();
    let weights_before: Vec<f64> = network.layers[0]
        .neurons
        .iter()
        .flat_map(|n| n.weights.clone())
        .collect();

    let trainer = Trainer::new(0.7, 0.3);
    let err = trainer.train(&mut network, &[1.0, 0.0]).unwrap_err();
    match err {
        NetworkError::OutputShape { expected, actual } => {
            assert_eq!(expected, 1);
            assert_eq!(actual, 2);
        }
        other => panic!("unexpected error: {other}"),
    }

    let weights_after: Vec<f64> = network.layers[0]
        .neurons
        .iter()
        .flat_map(|n| n.weights.clone())
        .collect();
    assert_eq!(weights_before, weights_after);
}

#[test]
fn mean_squared_error_averages_output_errors() {
    let mut network = Network::new(Activation::Sigmoid, false, &[1, 2]);
    network.evaluate(&[0.5]).unwrap(); // zero weights: both outputs are 0.5
    let trainer = Trainer::new(0.1, 0.0);
    trainer.train(&mut network, &[1.0, 0.0]).unwrap();
    // errors are 0.5 and -0.5, so the mean of squares is 0.25
    assert!((trainer.mean_squared_error(&network) - 0.25).abs() < TOL);
}

#[test]
fn train_before_evaluate_operates_on_default_zero_values() {
    let mut network = Network::new(Activation::Sigmoid, true, &[2, 1]);
    let trainer = Trainer::new(0.7, 0.3);
    trainer.train(&mut network, &[1.0]).unwrap();

    // every value defaults to 0.0: error = 1, delta = 1 * sigmoid'(0) = 0,
    // so no weight moves and the mse is exactly 1
    assert!((trainer.mean_squared_error(&network) - 1.0).abs() < TOL);
    for neuron in &network.layers[0].neurons {
        assert_eq!(neuron.weights, vec![0.0]);
    }
    assert_eq!(network.layers[0].bias_neuron.weights, vec![0.0]);
}

#[test]
fn training_leaves_neuron_values_untouched() {
    let mut network = Network::new(Activation::Sigmoid, true, &[2, 3, 1]);
    network.randomize_weights(8, 0.5);
    network.evaluate(&[0.6, -0.4]).unwrap();
    let values_before: Vec<f64> = network
        .layers
        .iter()
        .flat_map(|l| l.neurons.iter().map(|n| n.value))
        .collect();

    let trainer = Trainer::new(0.7, 0.3);
    trainer.train(&mut network, &[1.0]).unwrap();

    let values_after: Vec<f64> = network
        .layers
        .iter()
        .flat_map(|l| l.neurons.iter().map(|n| n.value))
        .collect();
    assert_eq!(values_before, values_after);
}
