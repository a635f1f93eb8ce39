use log::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sound {
    Eat,
    Crash,
}

pub trait Audio {
    fn play(&mut self, sound: Sound);
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Mute;

impl Audio for Mute {
    fn play(&mut self, sound: Sound) {
        debug!("Muted sound {:?}", sound);
    }
}

impl<T: Audio + ?Sized> Audio for Box<T> {
    fn play(&mut self, sound: Sound) {
        (**self).play(sound);
    }
}
