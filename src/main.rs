//! # chatstat CLI
//!
//! Command-line interface for the chatstat library.

use std::process;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser as ClapParser;

use chatstat::cli::{Args, RankEntry, Report, parse_date};
use chatstat::load::Loader;
use chatstat::stats::{RankMetric, count_messages, count_words, rank};
use chatstat::{Chat, ChatstatError};

fn main() {
    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), ChatstatError> {
    let total_start = Instant::now();
    let args = <Args as ClapParser>::parse();

    if !args.json {
        println!("📊 chatstat v{}", env!("CARGO_PKG_VERSION"));
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        println!("📂 Input:   {}", args.input);
        println!("📏 Metric:  {}", args.metric);
        if let Some(ref kind) = args.kind {
            println!("🏷  Kind:    {}", kind);
        }
        println!();
    }

    // Load on a worker so the progress line stays responsive
    let mut loader = Loader::new();
    if !args.no_progress {
        loader = loader.with_progress(Arc::new(|p| {
            eprint!("\r⏳ Loading: {:>5.1}%", p.percentage());
            if p.is_complete() {
                eprintln!();
            }
        }));
    }

    let load_start = Instant::now();
    let chat = loader.spawn(&args.input).join()?;
    let load_time = load_start.elapsed();

    // Query window defaults to the chat's own span
    let start = match args.after.as_deref() {
        Some(date) => parse_date(date)?,
        None => chat.start_date(),
    };
    let end = match args.before.as_deref() {
        Some(date) => parse_date(date)?,
        None => chat.end_date(),
    };

    let metric: RankMetric = args.metric.into();
    let kind = args.kind.as_ref();
    let messages = count_messages(&chat, start, end, kind);
    let words = count_words(&chat, start, end);
    let ranking = rank(&chat, metric, start, end, kind);

    if args.json {
        let report = Report {
            subject: chat.subject.clone(),
            start_date: start,
            end_date: end,
            members: chat.members().len(),
            messages,
            words,
            metric,
            ranking: ranking
                .into_iter()
                .map(|(name, count)| RankEntry { name, count })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_summary(&chat, messages, words);
    print_ranking(metric, &ranking);

    let total_time = total_start.elapsed();
    println!();
    println!("⚡ Performance:");
    println!("   Load time:   {:.2}s", load_time.as_secs_f64());
    println!("   Total time:  {:.2}s", total_time.as_secs_f64());
    let msgs_per_sec = chat.len() as f64 / load_time.as_secs_f64();
    println!("   Throughput:  {:.0} messages/sec", msgs_per_sec);

    Ok(())
}

fn print_summary(chat: &Chat, messages: usize, words: usize) {
    println!("💬 Subject:  {}", chat.subject.as_deref().unwrap_or("(none)"));
    println!("👥 Members:  {}", chat.members().len());
    println!("🗓  Span:     {} to {}", chat.start_date(), chat.end_date());
    println!("✉️  Messages: {}", messages);
    println!("📝 Words:    {}", words);
}

fn print_ranking(metric: RankMetric, ranking: &[(String, usize)]) {
    println!();
    if ranking.is_empty() {
        println!("🏆 No members with {} in this window", metric);
        return;
    }

    println!("🏆 Ranking by {}:", metric);
    for (position, (name, count)) in ranking.iter().enumerate() {
        println!("   {:>2}. {:<24} {}", position + 1, name, count);
    }
}
