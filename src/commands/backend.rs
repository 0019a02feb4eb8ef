use crate::cli::BackendAction;
use crate::prefs::BackendSelection;
use crate::App;

pub fn run(app: &App, action: BackendAction) -> anyhow::Result<()> {
    match action {
        BackendAction::List => print!("{}", list(&app.selection)),
        BackendAction::Show => {
            let backend = app.selection.current();
            println!("{}\t{}", backend.name, backend.endpoint);
        }
        BackendAction::Select { name } => {
            let backend = app.selection.select(&name)?;
            println!("{}\t{}", backend.name, backend.endpoint);
        }
    }
    Ok(())
}

fn list(selection: &BackendSelection) -> String {
    let current = selection.current();
    selection
        .registry()
        .iter()
        .map(|backend| {
            let marker = if backend.name == current.name { '*' } else { ' ' };
            format!("{marker} {}\t{}\n", backend.name, backend.endpoint)
        })
        .collect()
}
