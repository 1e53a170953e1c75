use backprop_nn::{ActivationFunction, LearningRateSchedule, LossType, NetworkBuilder};

fn main() -> Result<(), backprop_nn::NetworkError> {
    tracing_subscriber::fmt::init();

    let mut network = NetworkBuilder::with_inputs(2)
        .with_layer(2, ActivationFunction::ReLU)
        .with_layer(1, ActivationFunction::Sigmoid)
        .with_loss(LossType::Mse)
        .build()?;

    println!("{}", network.dump());

    let samples = [
        // a, b, a ^ b
        [0.0, 0.0, 0.0],
        [0.0, 1.0, 1.0],
        [1.0, 0.0, 1.0],
        [1.0, 1.0, 0.0],
    ];

    let mut learning_rate = LearningRateSchedule::new(0.15, 1e-4);
    let epochs = 4000;

    for epoch in 0..epochs {
        let mut loss = 0.0;
        for sample in &samples {
            loss += network.train(&sample[..2], &sample[2..], learning_rate.value())?;
        }
        learning_rate.decay();
        if epoch % 500 == 0 {
            println!("Epoch {epoch}: loss = {:.6}, lr = {:.5}", loss / 4.0, learning_rate.value());
        }
    }

    for sample in &samples {
        let predicted = network.apply(&sample[..2])?;
        println!("{} ^ {} = {:.4}, expected: {}", sample[0], sample[1], predicted[0], sample[2]);
    }
    Ok(())
}
