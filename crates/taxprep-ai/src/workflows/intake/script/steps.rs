use super::super::domain::IntakeStep;

/// Canned questions for each stage of the questionnaire. `Complete` carries
/// no questions; a session never sits on it in progress.
pub fn questions_for(step: IntakeStep) -> &'static [&'static str] {
    match step {
        IntakeStep::PersonalInfo => &[
            "What is your full name?",
            "What is the best email address to reach you?",
            "What phone number should we use for appointment updates?",
        ],
        IntakeStep::FilingStatus => &[
            "How will you be filing this year - single, married filing jointly, married filing separately, head of household, or qualifying widow(er)?",
        ],
        IntakeStep::Dependents => &[
            "How many dependents will you claim this year?",
            "What are their names and how are they related to you?",
        ],
        IntakeStep::Employment => &[
            "Tell us about your work this year - were you a W-2 employee, self-employed, or a mix of both?",
        ],
        IntakeStep::IncomeTypes => &[
            "Outside of your main job, did you have any other income - investments, rental property, crypto, retirement distributions, unemployment?",
        ],
        IntakeStep::Deductions => &[
            "Do you expect to itemize? Tell us about mortgage interest, charitable giving, medical expenses, education costs, or childcare.",
            "Did you contribute to a retirement account or pay property taxes you want to deduct?",
        ],
        IntakeStep::SpecialSituations => &[
            "Did you buy, sell, or trade any cryptocurrency this year?",
            "Do you have any foreign bank accounts or income from outside the US?",
            "Do you own any rental property?",
            "Do you have business income, for example from an LLC or a side business?",
        ],
        IntakeStep::DocumentUpload => &[
            "Which of the documents from your checklist do you already have on hand?",
        ],
        IntakeStep::Review => &[
            "Does everything above look accurate? Reply 'yes' to finish your intake.",
        ],
        IntakeStep::Complete => &[],
    }
}

/// Step-specific early exits: an answer that makes the remaining canned
/// questions for the step redundant.
pub fn short_circuits(step: IntakeStep, answer: &str) -> bool {
    let lowered = answer.to_lowercase();
    match step {
        IntakeStep::SpecialSituations => lowered.contains("no") && lowered.contains("none"),
        IntakeStep::Dependents => {
            !lowered.chars().any(|c| c.is_ascii_digit())
                && (lowered.contains("no") || lowered.contains("none") || lowered.contains("zero"))
        }
        _ => false,
    }
}
