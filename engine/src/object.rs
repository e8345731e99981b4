use std::{collections::HashMap, rc::Rc};
use crate::{
    animation::Animation,
    audio::AudioSource,
    geom::V2f,
};

/// Behavioral state of an entity. `None` is the unset value and is never
/// accepted by setters.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObjectState {
    #[default]
    None = 0,
    Idle = 1,
    Attack = 2,
    Death = 3,
    Walk = 4,
    IdleDepth = 5,
    Damage = 6,
}

impl ObjectState {
    pub const ALL: [ObjectState; 6] = [
        ObjectState::Idle,
        ObjectState::Attack,
        ObjectState::Death,
        ObjectState::Walk,
        ObjectState::IdleDepth,
        ObjectState::Damage,
    ];

    pub fn is_none(self) -> bool {
        self == ObjectState::None
    }
}

/// Animation lookup shared by objects and weapons: `None` and unmapped states
/// yield a new empty animation on every call.
pub(crate) fn lookup_animation(
    animations: &HashMap<ObjectState, Rc<Animation>>,
    state: ObjectState,
) -> Rc<Animation> {
    if state.is_none() {
        return Rc::new(Animation::new());
    }
    animations
        .get(&state)
        .cloned()
        .unwrap_or_else(|| Rc::new(Animation::new()))
}

/// Position, velocity and per-state animations of one entity.
#[derive(Debug)]
pub struct GameObject {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub remove: bool,
    pub id: i32,

    pub audio: HashMap<ObjectState, AudioSource>,
    pub animations: HashMap<ObjectState, Rc<Animation>>,

    current_state: ObjectState,
}

impl GameObject {
    pub fn new(x: f32, y: f32, vx: f32, vy: f32) -> Self {
        Self {
            x,
            y,
            vx,
            vy,
            remove: false,
            id: 0,
            audio: HashMap::new(),
            animations: HashMap::new(),
            current_state: ObjectState::None,
        }
    }

    pub fn position(&self) -> V2f {
        V2f::new(self.x, self.y)
    }

    pub fn velocity(&self) -> V2f {
        V2f::new(self.vx, self.vy)
    }

    pub fn insert_animation(&mut self, state: ObjectState, animation: Rc<Animation>) -> Option<Rc<Animation>> {
        self.animations.insert(state, animation)
    }

    pub fn insert_audio(&mut self, state: ObjectState, audio: AudioSource) -> Option<AudioSource> {
        self.audio.insert(state, audio)
    }

    pub fn audio(&self, state: ObjectState) -> Option<&AudioSource> {
        self.audio.get(&state)
    }

    pub fn animation(&self, state: ObjectState) -> Rc<Animation> {
        lookup_animation(&self.animations, state)
    }

    pub fn animation_by_current_state(&self) -> Rc<Animation> {
        self.animation(self.current_state)
    }

    pub fn current_state(&self) -> ObjectState {
        self.current_state
    }

    /// Switches state. `ObjectState::None` is ignored.
    pub fn set_current_state(&mut self, state: ObjectState) {
        if state.is_none() {
            return;
        }
        self.current_state = state;
    }
}

/// Per-frame behavior of a concrete game entity built around a [`GameObject`].
pub trait Process {
    fn object(&self) -> &GameObject;
    fn object_mut(&mut self) -> &mut GameObject;

    fn process(&mut self, distance_to_player: f32, fov: i32, player: &GameObject);
}
