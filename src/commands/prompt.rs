use almanac_core::config::Subject;
use almanac_core::prompt::build_prompt;

pub fn run(subject: String, info: Option<String>, year: i32) {
    let subject = Subject {
        name: subject,
        authority_url: None,
        additional_info: info,
    };

    println!("{}", build_prompt(&subject, year));
}
