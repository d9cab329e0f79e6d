use schedsim::policy::{Agent, AgentConfig, Fcfs, PriorityPolicy, RoundRobin, Sjf, Srtf};
use schedsim::sim::{
    average_turnaround, average_waiting, evaluate, generate_processes, sample_processes, simulate,
    train, TrainingConfig,
};
use schedsim::{Process, SimError};

fn main() -> Result<(), SimError> {
    env_logger::init();

    print_results("First Come First Serve (FCFS)", &simulate(sample_processes(), Fcfs)?.completed);
    print_results("Shortest Job First (SJF)", &simulate(sample_processes(), Sjf)?.completed);
    print_results("Priority", &simulate(sample_processes(), PriorityPolicy)?.completed);
    print_results(
        "Round Robin (quantum = 3)",
        &simulate(sample_processes(), RoundRobin::new(3)?)?.completed,
    );
    print_results(
        "Shortest Remaining Time First (SRTF)",
        &simulate(sample_processes(), Srtf)?.completed,
    );

    // Train the adaptive policy on generated workloads, then evaluate it on
    // a workload it never saw during training.
    let mut agent = Agent::new(AgentConfig::default())?;
    let cfg = TrainingConfig {
        episodes: 300,
        procs_per_episode: 8,
        quantum: 3,
        seed: 0,
    };
    let stats = train(&mut agent, &cfg)?;
    println!("\n--- Adaptive policy training ---");
    for s in stats.iter().step_by(50).chain(stats.last()) {
        println!(
            "episode {:>3}: epsilon={:.3} avg_waiting={:.2} avg_turnaround={:.2}",
            s.episode, s.epsilon, s.avg_waiting, s.avg_turnaround
        );
    }
    println!("states x actions learned: {}", agent.table_len());

    let outcome = evaluate(&mut agent, generate_processes(8, 9999), cfg.quantum)?;
    print_results("Adaptive (trained)", &outcome.completed);

    Ok(())
}

fn print_results(name: &str, completed: &[Process]) {
    let mut procs: Vec<&Process> = completed.iter().collect();
    procs.sort_by_key(|p| p.id);

    println!("\n--- {name} ---");
    println!("PID\tArrival\tBurst\tStart\tCompletion\tWaiting\tTurnaround\tResponse");
    for p in &procs {
        println!(
            "P{}\t{}\t{}\t{}\t{}\t\t{}\t{}\t\t{}",
            p.id,
            p.arrival,
            p.burst,
            p.start.unwrap_or(0),
            p.completion.unwrap_or(0),
            p.waiting,
            p.turnaround,
            p.response.unwrap_or(0),
        );
    }
    println!(
        "Average waiting: {:.2} ticks, average turnaround: {:.2} ticks",
        average_waiting(completed),
        average_turnaround(completed)
    );
}
