// This binary is intentionally small; all network logic lives in the library.
// It trains XOR from a JSON architecture description and prints the result.
//
//   cargo run -- [spec.json]
//   RUST_LOG=debug cargo run
use backprop_nn::{
    train_loop, ActivationFunction, LayerSpec, LearningRateSchedule, LossType, NetworkSpec, TrainConfig,
};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn default_spec() -> NetworkSpec {
    NetworkSpec {
        name: "xor".into(),
        inputs: 2,
        layers: vec![
            LayerSpec { size: 4, activation: ActivationFunction::Tanh, momentum: 0.5 },
            LayerSpec { size: 1, activation: ActivationFunction::Sigmoid, momentum: 0.5 },
        ],
        loss: LossType::Mse,
        seed: None,
    }
}

fn main() {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to install logger: {e}");
    }

    let spec = match std::env::args().nth(1) {
        Some(path) => match NetworkSpec::load_json(&path) {
            Ok(spec) => spec,
            Err(e) => {
                error!(%path, "cannot read network spec: {e}");
                std::process::exit(1);
            }
        },
        None => default_spec(),
    };

    let mut network = match spec.build() {
        Ok(network) => network,
        Err(e) => {
            error!("cannot build network: {e}");
            std::process::exit(1);
        }
    };

    let inputs = vec![vec![0.0, 0.0], vec![0.0, 1.0], vec![1.0, 0.0], vec![1.0, 1.0]];
    let targets = vec![vec![0.0], vec![1.0], vec![1.0], vec![0.0]];

    let config = TrainConfig::new(5000, LearningRateSchedule::new(0.3, 1e-4)).target_loss(1e-4);
    match train_loop(&mut network, &inputs, &targets, &config) {
        Ok(loss) => info!(name = %spec.name, loss, "training complete"),
        Err(e) => {
            error!("training failed: {e}");
            std::process::exit(1);
        }
    }

    for input in &inputs {
        match network.apply(input) {
            Ok(output) => println!("{} ^ {} = {:.4}", input[0], input[1], output[0]),
            Err(e) => error!("inference failed: {e}"),
        }
    }
    println!("{}", network.dump());
}
