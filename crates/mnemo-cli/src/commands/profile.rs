//! The `mnemo profile` command.

use anyhow::{Context, Result};

use mnemo_core::profile::{learning_profile, LearningStyle, QUESTIONS};

pub fn execute(answers: Option<String>) -> Result<()> {
    let Some(answers) = answers else {
        for (i, q) in QUESTIONS.iter().enumerate() {
            println!("{}. {}", i + 1, q.question);
            for (j, option) in q.options.iter().enumerate() {
                println!("   {}) {}", j + 1, option);
            }
        }
        println!("\nAnswer with: mnemo profile --answers 1,3,2,...");
        return Ok(());
    };

    let choices: Vec<usize> = answers
        .split(',')
        .map(|s| {
            let n: usize = s
                .trim()
                .parse()
                .with_context(|| format!("invalid answer: '{}'", s.trim()))?;
            anyhow::ensure!(n >= 1, "answers are numbered from 1");
            Ok(n - 1)
        })
        .collect::<Result<_>>()?;

    let profile = learning_profile(&choices)?;

    println!("Primary style: {}", profile.primary);
    println!("Secondary style: {}", profile.secondary);
    for style in LearningStyle::ALL {
        println!("  {:<12} {:>3}%", style.to_string(), profile.percentages[&style]);
    }
    println!("\nStrengths:");
    for s in &profile.strengths {
        println!("  - {s}");
    }
    println!("Recommendations:");
    for r in &profile.recommendations {
        println!("  - {r}");
    }

    Ok(())
}
