use std::{collections::HashMap, rc::Rc};
use crate::{
    animation::Animation,
    geom::V2i,
    object::{lookup_animation, ObjectState},
    render::{Canvas, Sprite},
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WeaponType {
    Cold = 0,
    FireArm = 1,
}

#[derive(Debug)]
pub struct Weapon {
    pub kind: WeaponType,
    pub animations: HashMap<ObjectState, Rc<Animation>>,
    current_animation: Option<Rc<Animation>>,
}

impl Weapon {
    pub fn new(kind: WeaponType) -> Self {
        Self {
            kind,
            animations: HashMap::new(),
            current_animation: None,
        }
    }

    pub fn insert_animation(&mut self, state: ObjectState, animation: Rc<Animation>) -> Option<Rc<Animation>> {
        self.animations.insert(state, animation)
    }

    pub fn animation(&self, state: ObjectState) -> Rc<Animation> {
        lookup_animation(&self.animations, state)
    }

    pub fn current_animation(&self) -> Option<Rc<Animation>> {
        self.current_animation.clone()
    }

    /// Makes the animation for `state` active and flags it to start delayed.
    pub fn on_mouse_button_down(&mut self, state: ObjectState) {
        let animation = self.animation(state);
        animation.delayed_start(true);
        self.current_animation = Some(animation);
    }
}

/// Rendering of a concrete weapon over the player's view.
pub trait DrawSelf {
    fn weapon(&self) -> &Weapon;
    fn weapon_mut(&mut self) -> &mut Weapon;

    /// `is_hand_drawn` is set once the weapon has drawn the player's hand;
    /// `player_positions` collects screen points other passes need.
    fn draw_self(
        &mut self,
        canvas: &mut Canvas,
        fov: i32,
        current_sprite: Option<&Sprite>,
        is_hand_drawn: &mut bool,
        player_positions: &mut Vec<V2i>,
    );
}
