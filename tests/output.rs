use tender_board::output::{format_human, HumanOutput};

#[test]
fn format_human_includes_sections() {
    let mut human = HumanOutput::new("Task moved");
    human.push_summary("Result", "task 1 moved from To - Do List to Completed");
    human.push_detail("to-do #2 [High] Construction Tender 1");
    human.push_warning("board state is not saved");

    let rendered = format_human(&human);
    assert!(rendered.contains("Task moved"));
    assert!(rendered.contains("Summary:"));
    assert!(rendered.contains("- Result: task 1 moved from To - Do List to Completed"));
    assert!(rendered.contains("Details:"));
    assert!(rendered.contains("- to-do #2 [High] Construction Tender 1"));
    assert!(rendered.contains("Warnings:"));
    assert!(rendered.contains("- board state is not saved"));
}

#[test]
fn format_human_omits_empty_sections() {
    let human = HumanOutput::new("Lanes");
    let rendered = format_human(&human);
    assert_eq!(rendered, "Lanes");
}
