use std::process;

fn main() {
    match ssg_html_cli::run() {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("ssg-html error: {err:#}");
            process::exit(1);
        }
    }
}
