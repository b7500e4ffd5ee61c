use teloxide::utils::command::BotCommands;

use crate::{
    auth::Role,
    commands::Command,
    database::answer_key::AnswerKeyRecord,
    error::TestDataError,
    grader::{GradeResult, LengthMismatch},
    keyboard::{ADD_TEST, DELETE_TEST, LIST_TESTS, SOLVE_TEST},
};

pub(crate) fn welcome(role: Role) -> String {
    match role {
        Role::Admin => "Hello, Admin!\n\nUse the buttons below:".to_owned(),
        Role::User => "Hello!\n\nPress the button below to solve a test:".to_owned(),
    }
}

pub(crate) fn help(role: Role) -> String {
    let buttons = match role {
        Role::Admin => format!("{ADD_TEST}\n{DELETE_TEST}\n{LIST_TESTS}"),
        Role::User => SOLVE_TEST.to_owned(),
    };
    format!("{}\n\nButtons:\n{}", Command::descriptions(), buttons)
}

pub(crate) const CANCELLED: &str = "Cancelled. What do you want to do now?";

pub(crate) const ASK_TEST_DATA: &str = "Send the test id and its answers:\n`test_id:answers`";

pub(crate) const ASK_DELETE_ID: &str = "Send the id of the test to delete:";

pub(crate) fn test_saved(test_id: &str) -> String {
    format!("✅ Test `{}` saved!", test_id)
}

pub(crate) const DUPLICATE_TEST: &str =
    "A test with this id already exists. Please use another id!";

pub(crate) fn invalid_test_data(e: &TestDataError) -> String {
    format!("❌ Error: {}", e)
}

pub(crate) const SAVE_FAILED: &str = "❌ Failed to save the test. Please try again later.";

pub(crate) fn test_deleted(test_id: &str) -> String {
    format!("🗑 Test `{}` deleted!", test_id)
}

pub(crate) const DELETE_FAILED: &str = "❌ Failed to delete the test. Please try again later.";

pub(crate) const NO_SUCH_ID: &str = "4️⃣0️⃣4️⃣ There is no test with this id!🤔";

pub(crate) fn all_tests(records: &[AnswerKeyRecord]) -> String {
    if records.is_empty() {
        return "📭 There are no tests yet.".to_owned();
    }

    let mut message = String::from("📜 All tests:\n\n");
    for record in records {
        message.push_str(&format!("{}\n", record));
    }
    message
}

pub(crate) fn admin_invalid_command() -> String {
    format!(
        "❌ Invalid command! Please use one of:\n\n{}\n{}\n{}",
        ADD_TEST, DELETE_TEST, LIST_TESTS
    )
}

pub(crate) const NOT_ADMIN: &str = "❌ You are not an admin!";

pub(crate) const SOLVE_INSTRUCTIONS: &str =
    "Send the test id and your answers in this format:\n`test_id:answers`\n\nExample: `test1:ABCD`";

pub(crate) const TEST_NOT_FOUND: &str = "❌ Test not found!";

pub(crate) fn wrong_answer_count(e: &LengthMismatch) -> String {
    format!("❌ Wrong number of answers! Expected: {}", e.expected)
}

pub(crate) fn grade_report(test_id: &str, result: &GradeResult) -> String {
    let feedback: Vec<String> = result
        .positions()
        .iter()
        .map(|p| {
            if p.is_correct() {
                format!("{}) {} ✅", p.position, p.submitted)
            } else {
                format!("{}) {} ❌ (correct: {})", p.position, p.submitted, p.expected)
            }
        })
        .collect();

    format!(
        "📊 Test: {}\n✅ Correct: {}/{}\n📈 Score: {:.1}%\n\n📋 Results:\n{}",
        test_id,
        result.correct(),
        result.total(),
        result.percentage(),
        feedback.join("\n")
    )
}

pub(crate) fn user_invalid_command() -> String {
    format!("❌ Invalid command! Please use:\n\n{}", SOLVE_TEST)
}

pub(crate) fn hint(role: Role) -> String {
    match role {
        Role::Admin => format!("Admin commands:\n{}, {}, {}", ADD_TEST, DELETE_TEST, LIST_TESTS),
        Role::User => "Use the button below to solve a test:".to_owned(),
    }
}

pub(crate) const APOLOGY: &str = "Sorry, something went wrong. Please try again.";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grader::grade;

    #[test]
    fn grade_report_lists_each_position() {
        let result = grade("ABXD", "ABCD").unwrap();
        assert_eq!(
            grade_report("q1", &result),
            "📊 Test: q1\n✅ Correct: 3/4\n📈 Score: 75.0%\n\n📋 Results:\n\
             1) A ✅\n2) B ✅\n3) X ❌ (correct: C)\n4) D ✅"
        );
    }

    #[test]
    fn empty_list_has_its_own_message() {
        assert_eq!(all_tests(&[]), "📭 There are no tests yet.");
    }
}
