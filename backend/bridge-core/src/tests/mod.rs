mod dispatcher;
mod installer;
mod settings;
