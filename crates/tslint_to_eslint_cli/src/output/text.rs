//! Text output formatter

use super::{CommentsReport, EditorReport, MigrationReport};

pub fn output_text(report: &MigrationReport) {
    let results = &report.conversion.rules;

    if report.dry_run {
        println!("{}:", report.output_path.display());
        print!("{}", report.output);
        println!();
    }

    let verb = if report.dry_run { "Would write" } else { "Wrote" };
    let converted = results.converted_rule_count();
    println!(
        "✨ {} {} converted into {} ESLint rules. {} {}",
        converted,
        plural(converted, "TSLint rule was", "TSLint rules were"),
        results.converted.len(),
        verb,
        report.output_path.display()
    );

    if !results.failed.is_empty() {
        println!("\n❌ {} rules threw errors during conversion:", results.failed.len());
        for failure in &results.failed {
            println!("  {}", failure);
        }
    }

    if !results.missing.is_empty() {
        println!(
            "\n❓ {} rules have no ESLint equivalent and will run through eslint-plugin-tslint:",
            results.missing.len()
        );
        for rule in &results.missing {
            println!("  {}", rule.name);
        }
    }

    let notices: Vec<_> = results
        .converted
        .iter()
        .flat_map(|(name, settings)| settings.notices.iter().map(move |notice| (name, notice)))
        .collect();
    if !notices.is_empty() {
        println!(
            "\n📢 {} ESLint rules behave differently from their TSLint counterparts:",
            notices.len()
        );
        for (name, notice) in notices {
            println!("  {}: {}", name, notice);
        }
    }

    if !results.conflicts.is_empty() {
        println!(
            "\n🔀 {} converted rules were already configured; the existing settings were kept:",
            results.conflicts.len()
        );
        for conflict in &results.conflicts {
            println!("  {}", conflict.rule_name);
        }
    }

    if !report.conversion.missing_extends.is_empty() {
        println!(
            "\n❓ {} extended configurations could not be converted:",
            report.conversion.missing_extends.len()
        );
        for preset in &report.conversion.missing_extends {
            println!("  {}", preset);
        }
    }

    if let Some(editor) = &report.editor {
        output_editor(editor, report.dry_run);
    }

    if let Some(comments) = &report.comments {
        output_comments(comments, report.dry_run);
    }

    println!(
        "\n⚡ {} packages are required for the new ESLint configuration.",
        report.packages.len()
    );
    println!("  {}", report.package_manager.install_command(&report.packages));
}

fn output_editor(editor: &EditorReport, dry_run: bool) {
    let results = &editor.results;
    let verb = if dry_run { "would be written to" } else { "written to" };
    println!(
        "\n✨ {} editor settings converted, {} {}",
        results.converted.len(),
        verb,
        editor.path.display()
    );
    for failure in &results.failed {
        println!("  ❌ {}", failure);
    }
    for name in &results.missing {
        println!("  ❓ {} has no ESLint equivalent", name);
    }
}

fn output_comments(comments: &CommentsReport, dry_run: bool) {
    let count = comments.changed_files.len();
    println!(
        "\n✨ {} comment directives converted in {} {} ({} searched){}",
        comments.converted,
        count,
        plural(count, "file", "files"),
        comments.files_searched,
        if dry_run { ", nothing written" } else { "" }
    );
    for path in &comments.changed_files {
        println!("  {}", path.display());
    }
    if comments.unchanged > 0 {
        println!(
            "  {} directives were left unchanged because none of their rules converted",
            comments.unchanged
        );
    }
    if !comments.dropped_rules.is_empty() {
        println!("  Dropped rules: {}", comments.dropped_rules.join(", "));
    }
}

fn plural(count: usize, singular: &'static str, multiple: &'static str) -> &'static str {
    if count == 1 { singular } else { multiple }
}
