// XOR demo: trains a 2-2-1 sigmoid network with momentum backprop, then
// shows the save/load round trip. Run with RUST_LOG=debug for init/persist
// logging.
use stratum_nn::{persist, Activation, Network, Trainer};

fn main() {
    env_logger::init();

    let mut network = Network::new(Activation::Sigmoid, true, &[2, 2, 1]);
    network.randomize_weights(42, 0.5);

    let samples = [
        ([0.0, 0.0], [0.0]),
        ([0.0, 1.0], [1.0]),
        ([1.0, 0.0], [1.0]),
        ([1.0, 1.0], [0.0]),
    ];

    let trainer = Trainer::new(0.7, 0.3);
    for epoch in 0..20_000 {
        let mut mse = 0.0;
        for (input, target) in &samples {
            network.evaluate(input).expect("input matches topology");
            trainer.train(&mut network, target).expect("target matches topology");
            mse += trainer.mean_squared_error(&network);
        }
        if epoch % 2_000 == 0 {
            println!("Epoch {epoch}: mse = {:.6}", mse / samples.len() as f64);
        }
    }

    for (input, target) in &samples {
        let output = network.evaluate(input).expect("input matches topology");
        println!("Input: {input:?} -> Output: {:.4} (target {})", output[0], target[0]);
    }

    persist::save(&network, "xor.json").expect("write xor.json");
    let mut reloaded = persist::load("xor.json", Activation::Sigmoid).expect("read xor.json");
    let check = reloaded.evaluate(&[1.0, 0.0]).expect("input matches topology");
    println!("Reloaded model on [1.0, 0.0]: {:.4}", check[0]);
}
